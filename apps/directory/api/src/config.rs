use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, env_required, server::ServerConfig};
use database::postgres::PostgresConfig;
use directory_rules::upload::DEFAULT_MAX_UPLOAD_BYTES;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (`RUN_MIGRATIONS`, default true)
    pub run_migrations: bool,
    /// Comma separated list from `CORS_ALLOWED_ORIGIN`
    pub cors_allowed_origins: String,
    /// Upload size limit reported by `/api/blobs/validate` (`UPLOAD_MAX_BYTES`)
    pub upload_max_bytes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
            cors_allowed_origins: env_required("CORS_ALLOWED_ORIGIN")?,
            upload_max_bytes: env_parse("UPLOAD_MAX_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 2] = [
        ("DATABASE_URL", Some("postgresql://localhost/directory")),
        ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
    ];

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                REQUIRED[0],
                REQUIRED[1],
                ("RUN_MIGRATIONS", None),
                ("UPLOAD_MAX_BYTES", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.run_migrations);
                assert_eq!(config.upload_max_bytes, 5 * 1024 * 1024);
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.app.name, "directory_api");
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                REQUIRED[0],
                REQUIRED[1],
                ("RUN_MIGRATIONS", Some("false")),
                ("UPLOAD_MAX_BYTES", Some("1024")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(!config.run_migrations);
                assert_eq!(config.upload_max_bytes, 1024);
            },
        );
    }

    #[test]
    fn test_cors_origin_is_required() {
        temp_env::with_vars([REQUIRED[0], ("CORS_ALLOWED_ORIGIN", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
        });
    }
}
