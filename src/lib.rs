mod cli;
mod error;
mod readiness_probe;
mod reporter;
mod settings;
mod wait_spec;
mod waiter;

pub use cli::Cli;
pub use error::{Error, Result};
pub use readiness_probe::{DatabaseProbe, Probe, Readiness};
pub use reporter::Reporter;
pub use settings::{Credentials, DatabaseKind, Endpoint, Mode, Settings};
pub use wait_spec::WaitSpec;
pub use waiter::{probe_once_reported, probe_with_retry, run, ONE_SHOT_ATTEMPT_TIMEOUT};
