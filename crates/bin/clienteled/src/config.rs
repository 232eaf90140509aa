//! Daemon settings.
//!
//! Read from an optional flat `clientele.toml`:
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3000
//! database_url = "sqlite:clientele.db?mode=rwc"
//! log = "clienteled=info,clientele=info,tower_http=debug"
//! ```
//!
//! then overridden by `CLIENTELE_HOST`, `CLIENTELE_PORT`, `CLIENTELE_BIND`
//! (`host:port`), `CLIENTELE_DATABASE_URL`, `CLIENTELE_LOG` and finally
//! `RUST_LOG`, in that order.

use std::path::Path;

use serde::Deserialize;

const SETTINGS_FILE: &str = "clientele.toml";

/// Everything the daemon needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// sqlx `SQLite` URL; `sqlite::memory:` keeps everything in RAM.
    pub database_url: String,
    /// `tracing-subscriber` filter directive.
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            database_url: "sqlite:clientele.db?mode=rwc".to_owned(),
            log: "clienteled=info,clientele=info,tower_http=debug".to_owned(),
        }
    }
}

type Override = fn(&mut Settings, String) -> Result<(), ConfigError>;

/// Applied top to bottom, so later entries win.
const ENV_OVERRIDES: &[(&str, Override)] = &[
    ("CLIENTELE_HOST", |s, value| {
        s.host = value;
        Ok(())
    }),
    ("CLIENTELE_PORT", |s, value| {
        s.port = parse_port("CLIENTELE_PORT", &value)?;
        Ok(())
    }),
    ("CLIENTELE_BIND", |s, value| {
        let (host, port) = value.rsplit_once(':').ok_or_else(|| ConfigError::Env {
            key: "CLIENTELE_BIND",
            reason: format!("expected host:port, got {value:?}"),
        })?;
        s.port = parse_port("CLIENTELE_BIND", port)?;
        s.host = host.to_owned();
        Ok(())
    }),
    ("CLIENTELE_DATABASE_URL", |s, value| {
        s.database_url = value;
        Ok(())
    }),
    ("CLIENTELE_LOG", |s, value| {
        s.log = value;
        Ok(())
    }),
    ("RUST_LOG", |s, value| {
        s.log = value;
        Ok(())
    }),
];

fn parse_port(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env {
        key,
        reason: format!("{value:?} is not a TCP port"),
    })
}

impl Settings {
    /// Resolve settings from `clientele.toml` and the process environment.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable or malformed file, an unparsable override or
    /// an unusable result.
    pub fn load() -> Result<Self, ConfigError> {
        Self::resolve(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
    }

    fn resolve(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        for (key, apply) in ENV_OVERRIDES {
            if let Some(value) = env(key) {
                apply(&mut settings, value)?;
            }
        }
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero"));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty"));
        }
        Ok(())
    }

    /// `host:port` for [`tokio::net::TcpListener::bind`].
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Why the daemon could not work out its settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read clientele.toml")]
    Io(#[from] std::io::Error),
    #[error("failed to parse clientele.toml")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {key}: {reason}")]
    Env { key: &'static str, reason: String },
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn missing() -> &'static Path {
        Path::new("does-not-exist/clientele.toml")
    }

    #[test]
    fn should_use_defaults_when_file_and_env_absent() {
        let settings = Settings::resolve(missing(), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_fill_missing_keys_with_defaults() {
        let settings: Settings = toml::from_str("port = 8080").unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.database_url, "sqlite:clientele.db?mode=rwc");
    }

    #[test]
    fn should_reject_unknown_keys_in_file() {
        let result: Result<Settings, _> = toml::from_str("prot = 8080");
        assert!(result.is_err());
    }

    #[test]
    fn should_apply_env_over_defaults() {
        let settings = Settings::resolve(
            missing(),
            env(&[
                ("CLIENTELE_HOST", "127.0.0.1"),
                ("CLIENTELE_PORT", "8081"),
                ("CLIENTELE_DATABASE_URL", "sqlite::memory:"),
                ("CLIENTELE_LOG", "warn"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.bind_addr(), "127.0.0.1:8081");
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.log, "warn");
    }

    #[test]
    fn should_let_bind_win_over_host_and_port() {
        let settings = Settings::resolve(
            missing(),
            env(&[
                ("CLIENTELE_HOST", "127.0.0.1"),
                ("CLIENTELE_PORT", "8081"),
                ("CLIENTELE_BIND", "10.0.0.1:7000"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.bind_addr(), "10.0.0.1:7000");
    }

    #[test]
    fn should_let_rust_log_win_over_clientele_log() {
        let settings = Settings::resolve(
            missing(),
            env(&[("CLIENTELE_LOG", "warn"), ("RUST_LOG", "trace")]),
        )
        .unwrap();
        assert_eq!(settings.log, "trace");
    }

    #[test]
    fn should_fail_on_unparsable_port_override() {
        let result = Settings::resolve(missing(), env(&[("CLIENTELE_PORT", "http")]));
        assert!(matches!(
            result,
            Err(ConfigError::Env {
                key: "CLIENTELE_PORT",
                ..
            })
        ));
    }

    #[test]
    fn should_fail_on_bind_without_port() {
        let result = Settings::resolve(missing(), env(&[("CLIENTELE_BIND", "localhost")]));
        assert!(matches!(
            result,
            Err(ConfigError::Env {
                key: "CLIENTELE_BIND",
                ..
            })
        ));
    }

    #[test]
    fn should_refuse_zero_port_and_blank_database_url() {
        let zero = Settings::resolve(missing(), env(&[("CLIENTELE_PORT", "0")]));
        assert!(matches!(zero, Err(ConfigError::Invalid(_))));

        let blank = Settings::resolve(missing(), env(&[("CLIENTELE_DATABASE_URL", " ")]));
        assert!(matches!(blank, Err(ConfigError::Invalid(_))));
    }
}
