use crate::error::{Error, Result};
use std::{fmt, str::FromStr, time::Duration};

const DEFAULT_INTERVAL_SECS: u64 = 1;
const MAX_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);
const ZERO_INTERVAL: &str = "interval must be at least one second";

/// Retry budget for wait mode, written as `TIMEOUT` or `TIMEOUT/INTERVAL` in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitSpec {
    timeout_secs: u64,
    interval_secs: u64,
}

impl WaitSpec {
    pub fn new(timeout_secs: u64, interval_secs: u64) -> Result<Self> {
        Self::checked(
            || format!("{}/{}", timeout_secs, interval_secs),
            timeout_secs,
            interval_secs,
        )
    }

    fn checked<G>(given: G, timeout_secs: u64, interval_secs: u64) -> Result<Self>
    where
        G: FnOnce() -> String,
    {
        if interval_secs == 0 {
            return Err(Error::InvalidWaitSpec {
                given: given(),
                reason: ZERO_INTERVAL,
            });
        }
        Ok(Self {
            timeout_secs,
            interval_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Retries allowed after the initial attempt.
    pub fn max_retries(&self) -> u64 {
        self.timeout_secs / self.interval_secs
    }

    /// Upper bound on a single attempt, so a hung connect cannot eat the whole budget.
    pub fn attempt_timeout(&self) -> Duration {
        self.interval().min(MAX_ATTEMPT_TIMEOUT)
    }
}

fn parse_secs(given: &str, part: &str) -> Result<u64> {
    let invalid = |reason| Error::InvalidWaitSpec {
        given: given.to_owned(),
        reason,
    };

    if part.is_empty() {
        return Err(invalid("expected TIMEOUT or TIMEOUT/INTERVAL"));
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("seconds must be a non-negative integer"));
    }
    part.parse().map_err(|_| invalid("seconds out of range"))
}

impl FromStr for WaitSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (timeout, interval) = match s.split_once('/') {
            Some((timeout, interval)) => (timeout, Some(interval)),
            None => (s, None),
        };

        let timeout_secs = parse_secs(s, timeout)?;
        let interval_secs = match interval {
            Some(interval) => parse_secs(s, interval)?,
            None => DEFAULT_INTERVAL_SECS,
        };

        Self::checked(|| s.to_owned(), timeout_secs, interval_secs)
    }
}

impl fmt::Display for WaitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.timeout_secs, self.interval_secs)
    }
}
