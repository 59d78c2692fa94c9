//! 日志系统模块
//!
//! - 人类可读日志输出到 stdout：`2025-01-01 08:00:00.123 [INFO] (target) — message`
//! - 配置了 `log_dir` 时额外写入按天轮转的 one-line JSON 文件
//! - `log` crate 的日志经 `LogTracer` 转发到 tracing
//!
//! tracing 没有 critical 级别，使用 [`critical!`](crate::critical) 记录：
//! 以 ERROR 级别发出并携带 `severity = "critical"` 字段，输出时显示为 `CRITICAL`。

use log::LevelFilter;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

static LOGGER_READY: OnceLock<()> = OnceLock::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const DEFAULT_FILTER: &str = "info,hyper=warn,hyper_util=warn,reqwest=warn,html5ever=warn,selectors=warn";
const LOG_FILE_NAME: &str = "dailysign.log";

/// Log an event at critical severity
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        ::tracing::error!(severity = "critical", $($arg)+)
    };
}

/// 日志初始化参数
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    /// 显式日志级别/过滤表达式，优先于 `RUST_LOG`
    pub level: Option<String>,
    /// JSON 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 初始化日志系统，重复调用直接返回
pub fn init_logger(options: &LoggerOptions) -> anyhow::Result<()> {
    if LOGGER_READY.get().is_some() {
        return Ok(());
    }

    // 将 log crate 的日志转发到 tracing
    let _ = LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init();

    let stdout_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .event_format(HumanReadableFormatter)
        .with_filter(build_filter(options.level.as_deref()));

    // JSON 层：写入文件（按天轮转）
    let json_layer = match &options.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = FILE_GUARD.set(guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .event_format(JsonFormatter::new())
                    .with_filter(build_filter(options.level.as_deref())),
            )
        }
        None => None,
    };

    let subscriber = Registry::default().with(stdout_layer).with(json_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    let _ = LOGGER_READY.set(());

    tracing::debug!(
        target: "dailysign::logging",
        log_dir = ?options.log_dir,
        version = env!("CARGO_PKG_VERSION"),
        "Logger initialized"
    );

    Ok(())
}

/// 显式级别 > `RUST_LOG` > 默认 INFO
fn build_filter(level: Option<&str>) -> EnvFilter {
    if let Some(level) = level {
        if let Ok(filter) = EnvFilter::try_new(level) {
            return filter;
        }
    }

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

// ============================================================
// 自定义格式化器
// ============================================================

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

fn is_critical(fields: &serde_json::Map<String, serde_json::Value>) -> bool {
    fields.get("severity").and_then(|v| v.as_str()) == Some("critical")
}

fn level_name(level: &Level, critical: bool) -> &'static str {
    if critical {
        "CRITICAL"
    } else {
        level.as_str()
    }
}

/// JSON 格式化器 - One-line JSON
struct JsonFormatter {
    pid: u32,
}

impl JsonFormatter {
    fn new() -> Self {
        Self {
            pid: std::process::id(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        let mut fields_visitor = JsonVisitor::new();
        event.record(&mut fields_visitor);
        let critical = is_critical(&fields_visitor.fields);

        let mut json = serde_json::json!({
            "timestamp": chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            "level": level_name(metadata.level(), critical),
            "pid": self.pid,
            "target": metadata.target(),
            "version": env!("CARGO_PKG_VERSION"),
        });

        if let Some(message) = fields_visitor.fields.remove("message") {
            json["message"] = message;
        }
        fields_visitor.fields.remove("severity");
        if !fields_visitor.fields.is_empty() {
            json["fields"] = serde_json::Value::Object(fields_visitor.fields);
        }

        writeln!(
            writer,
            "{}",
            serde_json::to_string(&json).unwrap_or_default()
        )
    }
}

/// 人类可读格式化器
/// 格式：2025-01-01 08:00:00.123 [INFO] (dailysign::executor) — message key=value
struct HumanReadableFormatter;

impl<S, N> FormatEvent<S, N> for HumanReadableFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        let mut fields_visitor = JsonVisitor::new();
        event.record(&mut fields_visitor);
        let critical = is_critical(&fields_visitor.fields);

        let name = level_name(metadata.level(), critical);
        let level = if writer.has_ansi_escapes() {
            let color = if critical {
                "\x1b[1;31m" // 粗体红色
            } else {
                match *metadata.level() {
                    Level::ERROR => "\x1b[31m", // 红色
                    Level::WARN => "\x1b[33m",  // 黄色
                    Level::INFO => "\x1b[32m",  // 绿色
                    Level::DEBUG => "\x1b[36m", // 青色
                    _ => "\x1b[35m",            // 紫色
                }
            };
            format!("{}{}\x1b[0m", color, name)
        } else {
            name.to_string()
        };

        let message = fields_visitor
            .fields
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let field_parts: Vec<String> = fields_visitor
            .fields
            .iter()
            .filter(|(key, _)| key.as_str() != "message" && key.as_str() != "severity")
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        let fields_str = if field_parts.is_empty() {
            String::new()
        } else {
            format!(" {}", field_parts.join(" "))
        };

        writeln!(
            writer,
            "{} [{}] ({}) — {}{}",
            timestamp,
            level,
            metadata.target(),
            message,
            fields_str
        )
    }
}

/// 访问者模式收集事件字段
struct JsonVisitor {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn new() -> Self {
        Self {
            fields: serde_json::Map::new(),
        }
    }
}

impl tracing::field::Visit for JsonVisitor {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name_marks_critical() {
        assert_eq!(level_name(&Level::ERROR, true), "CRITICAL");
        assert_eq!(level_name(&Level::ERROR, false), "ERROR");
        assert_eq!(level_name(&Level::INFO, false), "INFO");
    }

    #[test]
    fn test_is_critical_reads_severity_field() {
        let mut fields = serde_json::Map::new();
        assert!(!is_critical(&fields));
        fields.insert("severity".to_string(), serde_json::json!("critical"));
        assert!(is_critical(&fields));
    }
}
