// ==========================================
// 捐赠税务申报 - 作业日志接口
// ==========================================
// 作业逐联系人输出 Info/Error 行,供运维核对跳过/失败的联系人
// 默认实现转发到 tracing (target = "oppgave")
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// 作业日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// 作业日志接收端（只写，不关心返回）
pub trait OppgaveLogSink {
    fn log_message(&self, level: LogLevel, text: &str);
}

// ==========================================
// TracingLogSink - 转发到 tracing
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl OppgaveLogSink for TracingLogSink {
    fn log_message(&self, level: LogLevel, text: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "oppgave", "{}", text),
            LogLevel::Error => tracing::error!(target: "oppgave", "{}", text),
        }
    }
}

// ==========================================
// MemoryLogSink - 内存收集
// ==========================================
/// 把日志行保存在内存中，同时转发到 tracing
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已收集的全部日志行
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 指定级别的日志文本
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, text)| text)
            .collect()
    }
}

impl OppgaveLogSink for MemoryLogSink {
    fn log_message(&self, level: LogLevel, text: &str) {
        TracingLogSink.log_message(level, text);
        let mut guard = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((level, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_by_level() {
        let sink = MemoryLogSink::new();
        sink.log_message(LogLevel::Info, "first");
        sink.log_message(LogLevel::Error, "second");
        sink.log_message(LogLevel::Info, "third");

        assert_eq!(sink.entries().len(), 3);
        assert_eq!(sink.messages(LogLevel::Info), vec!["first", "third"]);
        assert_eq!(sink.messages(LogLevel::Error), vec!["second"]);
    }
}
