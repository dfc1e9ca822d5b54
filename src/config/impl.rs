use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 部署时常用的裸环境变量 → 配置键
///
/// 完整的覆盖方式是 EDUROOTS_<SECTION>_<KEY>，这里保留更短的别名。
const ENV_ALIASES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("JWT_SECRET", "jwt.secret"),
    ("DATABASE_URL", "database.url"),
    ("CACHE_TYPE", "cache.type"),
    ("REDIS_URL", "cache.redis.url"),
    ("REDIS_KEY_PREFIX", "cache.redis.key_prefix"),
    ("REDIS_TTL", "cache.default_ttl"),
    ("SCHOOL_YEAR", "school.default_school_year"),
];

impl AppConfig {
    /// 加载配置：config.toml → config.{APP_ENV}.toml → EDUROOTS_* → 别名变量
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            .add_source(
                Environment::with_prefix("EDUROOTS")
                    .separator("_")
                    .try_parsing(true),
            );
        for (var, key) in ENV_ALIASES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
        app_config.normalize()?;
        Ok(app_config)
    }

    /// 补全派生值并拒绝无法运行的组合
    fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            self.server.workers = num_cpus::get().min(self.server.max_workers.max(1));
        }
        if self.school.high_risk_absence_step == 0 {
            return Err(ConfigError::Message(
                "school.high_risk_absence_step must be greater than zero".to_string(),
            ));
        }
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if self.is_production() && self.jwt.secret == DEFAULT_JWT_SECRET {
            return Err(ConfigError::Message(
                "jwt.secret must be changed in production".to_string(),
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

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))
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

    /// 配置了 Unix 套接字时优先于 TCP
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        Some(self.server.unix_socket_path.as_str()).filter(|p| !p.is_empty())
    }
}

/// config.toml 中的占位密钥
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(extra: &str) -> Result<AppConfig, ConfigError> {
        let base = include_str!("../../config.toml");
        let mut config: AppConfig = Config::builder()
            .add_source(File::from_str(base, config::FileFormat::Toml))
            .add_source(File::from_str(extra, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.normalize()?;
        Ok(config)
    }

    #[test]
    fn test_default_file_is_valid() {
        let config = from_toml("").unwrap();
        assert!(config.server.workers >= 1);
        assert_eq!(config.school.high_risk_absence_step, 3);
        assert_eq!(config.cache.cache_type, "moka");
    }

    #[test]
    fn test_zero_risk_step_is_rejected() {
        assert!(from_toml("[school]\nhigh_risk_absence_step = 0").is_err());
    }

    #[test]
    fn test_placeholder_secret_rejected_in_production() {
        assert!(from_toml("[app]\nenvironment = \"production\"").is_err());
        let ok = from_toml("[app]\nenvironment = \"production\"\n[jwt]\nsecret = \"s3cr3t\"");
        assert!(ok.unwrap().is_production());
    }
}
