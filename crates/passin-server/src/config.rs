use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// 环境变量前缀，例如 `PASSIN__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "PASSIN";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    /// 连接池上限，未设置时使用驱动默认值
    #[serde(default)]
    pub max_connections: Option<u32>,

    /// 启动时创建缺失的表
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `RUST_LOG` 未设置时使用的过滤规则
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// 日志输出格式
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// 默认值函数
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_database_url() -> String {
    "sqlite://passin.db?mode=rwc".to_string()
}

fn default_auto_migrate() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
            auto_migrate: default_auto_migrate(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    /// 加载配置：TOML 文件（可缺省）叠加 `PASSIN__` 环境变量
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(path: &str, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read config from {path}"))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid config in {path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn empty_env() -> Environment {
        AppConfig::environment().source(Some(Default::default()))
    }

    #[test]
    fn test_defaults_when_file_missing() {
        let config = AppConfig::load_with_env("does/not/exist.toml", empty_env()).unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:3333");
        assert_eq!(config.database.url, "sqlite://passin.db?mode=rwc");
        assert_eq!(config.database.max_connections, None);
        assert!(config.database.auto_migrate);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[database]
url = "sqlite::memory:"
max_connections = 1
auto_migrate = false

[logging]
format = "json"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = AppConfig::load_with_env(path, empty_env()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, Some(1));
        assert!(!config.database.auto_migrate);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();

        let vars = [
            ("PASSIN__SERVER__PORT", "9090"),
            ("PASSIN__LOGGING__LEVEL", "debug,passin_core=trace"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let env = AppConfig::environment().source(Some(vars));

        let config = AppConfig::load_with_env(file.path().to_str().unwrap(), env).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, "debug,passin_core=trace");
    }

    #[test]
    fn test_invalid_format_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nformat = \"xml\"").unwrap();

        let result = AppConfig::load_with_env(file.path().to_str().unwrap(), empty_env());
        assert!(result.is_err());
    }
}
