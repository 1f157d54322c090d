use crate::{
    cli::Cli,
    error::{Error, Result},
    wait_spec::WaitSpec,
};
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum DatabaseKind {
    #[strum(to_string = "postgresql", serialize = "postgres", serialize = "pg")]
    PostgreSql,
    #[strum(to_string = "mysql")]
    MySql,
}

/// Environment variables consulted for each connection field.
struct EnvVars {
    host: &'static str,
    port: &'static str,
    user: &'static str,
    password: &'static str,
    database: &'static str,
}

impl DatabaseKind {
    pub fn parse(s: &str) -> Result<Self> {
        s.parse().map_err(|_| Error::UnknownDatabaseKind {
            given: s.to_owned(),
            supported: Self::iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::PostgreSql => 5432,
            Self::MySql => 3306,
        }
    }

    fn default_user(&self) -> &'static str {
        match self {
            Self::PostgreSql => "postgres",
            Self::MySql => "root",
        }
    }

    fn default_database(&self) -> Option<&'static str> {
        match self {
            Self::PostgreSql => Some("postgres"),
            Self::MySql => None,
        }
    }

    fn env_vars(&self) -> EnvVars {
        match self {
            // libpq
            Self::PostgreSql => EnvVars {
                host: "PGHOST",
                port: "PGPORT",
                user: "PGUSER",
                password: "PGPASSWORD",
                database: "PGDATABASE",
            },
            // mysql client
            Self::MySql => EnvVars {
                host: "MYSQL_HOST",
                port: "MYSQL_TCP_PORT",
                user: "MYSQL_USER",
                password: "MYSQL_PWD",
                database: "MYSQL_DATABASE",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    OneShot,
    Wait(WaitSpec),
}

/// Invocation context, resolved once at startup: CLI flags, then environment, then defaults.
#[derive(Clone, Debug)]
pub struct Settings {
    pub kind: DatabaseKind,
    pub endpoint: Endpoint,
    pub credentials: Credentials,
    pub database: Option<String>,
    pub mode: Mode,
    pub quiet: bool,
}

impl Settings {
    pub fn from_env(cli: &Cli) -> Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    pub fn resolve<F>(cli: &Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = cli.kind;
        let vars = kind.env_vars();
        // Empty values are treated as unset.
        let env = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let port = match cli.port {
            Some(port) => port,
            None => match env(vars.port) {
                Some(value) => value.parse().map_err(|_| Error::InvalidPort {
                    var: vars.port,
                    value,
                })?,
                None => kind.default_port(),
            },
        };

        let endpoint = Endpoint {
            host: cli
                .host
                .clone()
                .or_else(|| env(vars.host))
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
        };

        let credentials = Credentials {
            user: cli
                .user
                .clone()
                .or_else(|| env(vars.user))
                .unwrap_or_else(|| kind.default_user().to_owned()),
            password: cli.password.clone().or_else(|| env(vars.password)),
        };

        let database = cli
            .database
            .clone()
            .or_else(|| env(vars.database))
            .or_else(|| kind.default_database().map(str::to_owned));

        let mode = match cli.wait {
            Some(spec) => Mode::Wait(spec),
            None => Mode::OneShot,
        };

        let settings = Self {
            kind,
            endpoint,
            credentials,
            database,
            mode,
            quiet: cli.quiet,
        };
        log::trace!("Resolved settings: {:?}", settings);

        Ok(settings)
    }
}
