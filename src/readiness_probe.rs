use crate::{
    error::Result,
    settings::{Credentials, DatabaseKind, Endpoint, Settings},
};
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlConnection},
    postgres::{PgConnectOptions, PgConnection},
    Connection,
};
use std::process::ExitCode;
use strum_macros::Display;

/// Outcome of a run, mapped onto the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Readiness {
    Ready,
    NotReady,
    TimedOut,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn exit_code(&self) -> u8 {
        match self.is_ready() {
            true => 0,
            false => 1,
        }
    }
}

impl From<Readiness> for ExitCode {
    fn from(readiness: Readiness) -> Self {
        ExitCode::from(readiness.exit_code())
    }
}

/// A single readiness check against some dependency.
#[allow(async_fn_in_trait)]
pub trait Probe {
    /// Human-readable name of the thing being probed.
    fn target(&self) -> String;

    /// Makes exactly one attempt. Every kind of failure is reported the same way.
    async fn probe_once(&mut self) -> Result<()>;
}

/// Connects to a database, pings it and disconnects.
#[derive(Clone, Debug)]
pub struct DatabaseProbe {
    kind: DatabaseKind,
    endpoint: Endpoint,
    credentials: Credentials,
    database: Option<String>,
}

impl DatabaseProbe {
    pub fn new(settings: &Settings) -> Self {
        Self {
            kind: settings.kind,
            endpoint: settings.endpoint.clone(),
            credentials: settings.credentials.clone(),
            database: settings.database.clone(),
        }
    }

    /// Password sent to PostgreSQL. Always set, so a password sqlx picked up
    /// from `PGPASSWORD` on its own cannot override the resolved settings.
    fn pg_password(&self) -> &str {
        self.credentials.password.as_deref().unwrap_or_default()
    }

    fn pg_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&self.endpoint.host)
            .port(self.endpoint.port)
            .username(&self.credentials.user)
            .password(self.pg_password());
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        options
    }

    fn mysql_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.endpoint.host)
            .port(self.endpoint.port)
            .username(&self.credentials.user);
        if let Some(password) = &self.credentials.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        options
    }
}

impl Probe for DatabaseProbe {
    fn target(&self) -> String {
        format!("{} at {}", self.kind, self.endpoint)
    }

    async fn probe_once(&mut self) -> Result<()> {
        log::trace!("Connecting to {}", self.target());
        match self.kind {
            DatabaseKind::PostgreSql => {
                let mut conn = PgConnection::connect_with(&self.pg_options()).await?;
                conn.ping().await?;
                conn.close().await?;
            }
            DatabaseKind::MySql => {
                let mut conn = MySqlConnection::connect_with(&self.mysql_options()).await?;
                conn.ping().await?;
                conn.close().await?;
            }
        }
        log::trace!("{} answered ping", self.target());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, settings::Mode};

    fn settings(kind: DatabaseKind, port: u16) -> Settings {
        Settings {
            kind,
            endpoint: Endpoint {
                host: "127.0.0.1".to_owned(),
                port,
            },
            credentials: Credentials {
                user: "probe".to_owned(),
                password: Some("nopasswd".to_owned()),
            },
            database: Some("probe_db".to_owned()),
            mode: Mode::OneShot,
            quiet: true,
        }
    }

    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Readiness::Ready.exit_code(), 0);
        assert_eq!(Readiness::NotReady.exit_code(), 1);
        assert_eq!(Readiness::TimedOut.exit_code(), 1);
        assert_eq!(Readiness::TimedOut.to_string(), "timed_out");
    }

    #[test]
    fn test_target() {
        let probe = DatabaseProbe::new(&settings(DatabaseKind::MySql, 3306));
        assert_eq!(probe.target(), "mysql at 127.0.0.1:3306");
    }

    #[test]
    fn test_pg_options() {
        let options = DatabaseProbe::new(&settings(DatabaseKind::PostgreSql, 54320)).pg_options();
        assert_eq!(options.get_host(), "127.0.0.1");
        assert_eq!(options.get_port(), 54320);
        assert_eq!(options.get_username(), "probe");
        assert_eq!(options.get_database(), Some("probe_db"));
    }

    #[test]
    fn test_pg_password_follows_settings() {
        let mut settings = settings(DatabaseKind::PostgreSql, 5432);
        assert_eq!(DatabaseProbe::new(&settings).pg_password(), "nopasswd");

        settings.credentials.password = None;
        assert_eq!(DatabaseProbe::new(&settings).pg_password(), "");
    }

    #[tokio::test]
    async fn test_refused_postgresql() {
        let mut probe = DatabaseProbe::new(&settings(DatabaseKind::PostgreSql, closed_port()));
        assert!(matches!(probe.probe_once().await, Err(Error::Connect(_))));
    }

    #[tokio::test]
    async fn test_refused_mysql() {
        let mut probe = DatabaseProbe::new(&settings(DatabaseKind::MySql, closed_port()));
        assert!(matches!(probe.probe_once().await, Err(Error::Connect(_))));
    }
}
