/// Shop service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ShopConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Secret mixed into every password hash. Env var: `PASSWORD_PEPPER`.
    pub password_pepper: String,
    /// TCP port for the HTTP server (default 8080). Env var: `SHOP_PORT`.
    pub shop_port: u16,
    /// Apply pending migrations before serving. Env var: `RUN_MIGRATIONS`.
    pub run_migrations: bool,
    /// Admin account created at startup when missing.
    /// Env vars: `ADMIN_USERNAME` and `ADMIN_PASSWORD`, both required to take effect.
    pub bootstrap_admin: Option<(String, String)>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

impl ShopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let shop_port = match lookup("SHOP_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                name: "SHOP_PORT",
                value: v,
            })?,
            None => 8080,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "RUN_MIGRATIONS",
                    value: other.to_owned(),
                });
            }
        };

        let bootstrap_admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            password_pepper: required("PASSWORD_PEPPER")?,
            shop_port,
            run_migrations,
            bootstrap_admin,
        })
    }
}
