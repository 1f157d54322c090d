use crate::{settings::DatabaseKind, wait_spec::WaitSpec};
use clap::{ArgAction, Parser};

/// Check whether a database endpoint accepts connections, optionally waiting until it does.
///
/// Connection fields not given as flags are taken from the usual client environment
/// variables (PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE for PostgreSQL;
/// MYSQL_HOST, MYSQL_TCP_PORT, MYSQL_USER, MYSQL_PWD, MYSQL_DATABASE for MySQL).
#[derive(Parser, Debug)]
#[command(name = "dbready", version, disable_help_flag = true)]
pub struct Cli {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Suppress progress and result messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Retry until ready, for up to TIMEOUT seconds, every INTERVAL seconds (default 1)
    #[arg(short, long, value_name = "TIMEOUT[/INTERVAL]")]
    pub wait: Option<WaitSpec>,

    /// Database type: postgresql or mysql
    #[arg(
        short = 't',
        long = "type",
        value_name = "KIND",
        default_value_t = DatabaseKind::PostgreSql,
        value_parser = DatabaseKind::parse,
    )]
    pub kind: DatabaseKind,

    /// Database host
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Database port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// User to authenticate as
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password to authenticate with
    #[arg(short, long)]
    pub password: Option<String>,

    /// Database to connect to
    #[arg(short, long)]
    pub database: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
