use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEV_JWT_SECRET: &str = "edunova-development-secret-change-me";

// (配置键, 环境变量)，排在前面的变量优先
const ENV_OVERRIDES: &[(&str, &[&str])] = &[
    ("app.environment", &["APP_ENV"]),
    ("app.log_level", &["RUST_LOG"]),
    ("server.host", &["SERVER_HOST"]),
    ("server.port", &["SERVER_PORT", "PORT"]),
    ("server.unix_socket_path", &["UNIX_SOCKET"]),
    ("server.workers", &["CPU_COUNT"]),
    ("jwt.secret", &["JWT_SECRET"]),
    ("database.url", &["DATABASE_URL"]),
    ("cache.redis.url", &["REDIS_URL"]),
    ("cache.redis.key_prefix", &["REDIS_KEY_PREFIX"]),
];

fn first_env(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| std::env::var(name).ok())
}

impl AppConfig {
    /// 加载配置：config.toml -> config.{APP_ENV}.toml -> EDUNOVA__* -> 常用环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env_name}")).required(false))
            .add_source(
                Environment::with_prefix("EDUNOVA")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, names) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, first_env(names))?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (config file or JWT_SECRET)".to_string(),
            ));
        }
        if self.is_production() && self.jwt.secret == DEV_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret still uses the development default in production".to_string(),
            ));
        }
        if self.jwt.access_token_expiry <= 0 || self.jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".to_string(),
            ));
        }
        if self.rate_limit.enabled && self.rate_limit.window_secs == 0 {
            return Err(ConfigError::Message(
                "rate_limit.window_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时显式加载，便于把配置错误打印出来
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::get();
        assert!(config.server.workers >= 1);
        assert!(config.server.workers <= config.server.max_workers.max(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_dev_secret() {
        let mut config = AppConfig::get().clone();
        config.app.environment = "production".to_string();
        config.jwt.secret = DEV_JWT_SECRET.to_string();
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rate_limit_window_must_be_positive() {
        let mut config = AppConfig::get().clone();
        config.rate_limit.enabled = true;
        config.rate_limit.window_secs = 0;
        assert!(config.validate().is_err());
    }
}
