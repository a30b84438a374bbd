use crate::config::LoggingConfig;
use crate::error::AppError;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// sqlx 每条语句都打 info 日志，默认压到 warn
const QUIET_TARGETS: &str = "sqlx=warn,hyper=warn";

pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    // RUST_LOG 优先于配置文件
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(&config.level))
            .map_err(|e| {
                AppError::Config(::config::ConfigError::Message(format!(
                    "invalid logging.level '{}': {}",
                    config.level, e
                )))
            })?,
    };

    let formatting_layer = match config.format.as_str() {
        "json" => fmt::layer().json().flatten_event(true).boxed(),
        _ => fmt::layer().pretty().with_target(true).boxed(),
    };

    registry()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

/// 只给了级别时，本服务与请求追踪用该级别，其余噪音较大的依赖收敛；
/// 已是完整指令（含 `=`）则原样使用
fn default_directives(level: &str) -> String {
    if level.contains('=') {
        return level.to_string();
    }

    format!(
        "{level},apartment_api={level},tower_http={level},{QUIET_TARGETS}",
        level = level
    )
}
