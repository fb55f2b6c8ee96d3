//! Server configuration from the environment

use std::net::SocketAddr;
use std::time::Duration;

use admin::AdminAuthConfig;
use anyhow::Context;
use platform::config::{ConfigError, EnvReader};
use platform::password::StoredPasswordHash;
use report::GeminiConfig;
use report::infra::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_TOKEN_TTL_HOURS: u64 = 2;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub admin: AdminAuthConfig,
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_reader(EnvReader::from_env())
    }

    /// Every missing required variable is reported in one error.
    pub fn from_reader<F>(mut env: EnvReader<F>) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = env.required("DATABASE_URL");
        let jwt_secret = env.required("JWT_SECRET");
        let admin_username = env.required("ADMIN_USERNAME");
        let admin_password_hash = env.required("ADMIN_PASSWORD_HASH");
        let gemini_api_key = env.required("GEMINI_API_KEY");

        let token_ttl_hours = env.parse_or("ADMIN_TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        if token_ttl_hours == 0 {
            return Err(ConfigError::Invalid {
                name: "ADMIN_TOKEN_TTL_HOURS".into(),
                reason: "must be at least 1".into(),
            }
            .into());
        }
        let database_max_connections =
            env.parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let bind_addr: SocketAddr =
            env.parse_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse::<SocketAddr>()?)?;
        let frontend_origins: Vec<String> = env
            .optional("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        let gemini = GeminiConfig {
            api_key: gemini_api_key,
            model: env
                .optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env
                .optional("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ..GeminiConfig::default()
        };

        env.finish()?;

        let password_hash =
            StoredPasswordHash::parse(&admin_password_hash).context("ADMIN_PASSWORD_HASH")?;
        let admin = AdminAuthConfig::new(
            admin_username,
            password_hash,
            jwt_secret.into_bytes(),
            Duration::from_secs(token_ttl_hours * 3600),
        )
        .context("Admin auth configuration")?;

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            admin,
            gemini,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA_HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    fn reader(pairs: &[(&str, &str)]) -> EnvReader<Box<dyn Fn(&str) -> Option<String>>> {
        EnvReader::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/trainer"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("ADMIN_USERNAME", "root"),
            ("ADMIN_PASSWORD_HASH", SHA_HASH),
            ("GEMINI_API_KEY", "key"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_reader(reader(&complete())).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3001".parse().unwrap());
        assert_eq!(config.frontend_origins, ["http://localhost:5173"]);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.admin.token_ttl_secs(), 7200);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_overrides() {
        let mut pairs = complete();
        pairs.extend([
            ("ADMIN_TOKEN_TTL_HOURS", "8"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]);
        let config = ServerConfig::from_reader(reader(&pairs)).unwrap();

        assert_eq!(config.admin.token_ttl_secs(), 8 * 3600);
        assert_eq!(config.frontend_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_reports_all_missing_names() {
        let err = ServerConfig::from_reader(reader(&[("DATABASE_URL", "postgres://x")]))
            .unwrap_err()
            .to_string();

        for name in ["JWT_SECRET", "ADMIN_USERNAME", "ADMIN_PASSWORD_HASH", "GEMINI_API_KEY"] {
            assert!(err.contains(name), "{err}");
        }
        assert!(!err.contains("DATABASE_URL"));
    }

    #[test]
    fn test_rejects_weak_admin_settings() {
        let mut short_secret = complete();
        short_secret[1] = ("JWT_SECRET", "short");
        assert!(ServerConfig::from_reader(reader(&short_secret)).is_err());

        let mut bad_hash = complete();
        bad_hash[3] = ("ADMIN_PASSWORD_HASH", "plaintext");
        assert!(ServerConfig::from_reader(reader(&bad_hash)).is_err());

        let mut zero_ttl = complete();
        zero_ttl.push(("ADMIN_TOKEN_TTL_HOURS", "0"));
        assert!(ServerConfig::from_reader(reader(&zero_ttl)).is_err());
    }
}
