use anyhow::{Context, Result};
use clap::Parser;
use dbready::{Cli, DatabaseProbe, Readiness, Reporter, Settings};
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(cli: &Cli) -> Result<Readiness> {
    let settings = Settings::from_env(cli).context("Invalid connection settings")?;
    let mut probe = DatabaseProbe::new(&settings);
    let mut reporter = Reporter::stdio(settings.quiet);

    Ok(dbready::run(settings.mode, &mut probe, &mut reporter).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit 1, not clap's default of 2.
            return match e.use_stderr() {
                true => ExitCode::FAILURE,
                false => ExitCode::SUCCESS,
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(readiness) => {
            log::debug!("Finished: {}", readiness);
            readiness.into()
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
