use crate::config::{LogFormat, LoggingConfig};
use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// 初始化全局日志订阅器，`RUST_LOG` 优先于配置中的 `logging.level`
///
/// `RUST_LOG` 无法解析时退回配置值，并在订阅器就绪后记录警告
pub fn init(config: &LoggingConfig) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected) = build_filter(rust_log.as_deref(), &config.level)?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer()).try_init()?,
    }

    if let Some(err) = rejected {
        warn!(
            rust_log = rust_log.as_deref().unwrap_or_default(),
            error = %err,
            fallback = %config.level,
            "Ignoring invalid RUST_LOG"
        );
    }

    Ok(())
}

/// 构造过滤器，返回被拒绝的 `RUST_LOG` 解析错误（如有）
fn build_filter(rust_log: Option<&str>, level: &str) -> Result<(EnvFilter, Option<ParseError>)> {
    let rejected = match rust_log.filter(|value| !value.trim().is_empty()) {
        Some(value) => match EnvFilter::try_new(value) {
            Ok(filter) => return Ok((filter, None)),
            Err(err) => Some(err),
        },
        None => None,
    };

    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid logging.level {level:?}"))?;
    Ok((filter, rejected))
}
