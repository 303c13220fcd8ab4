//! 会话日志缓冲
//!
//! 每个编辑会话持有自己的日志缓冲，用于在页面上回显处理过程。
//! 缓冲有容量上限，超出时丢弃最早的行。

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::VecDeque;

/// 默认缓冲行数
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// 格式化为 `时间 - 级别 - 消息`
pub fn format_log_line(at: DateTime<Utc>, level: LogLevel, message: &str) -> String {
    format!(
        "{} - {} - {}",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        level.as_str(),
        message
    )
}

/// 日志输出端
pub trait LogSink {
    /// 追加一行已格式化的日志
    fn append(&mut self, line: String);

    /// 以当前时间格式化并追加
    fn record(&mut self, level: LogLevel, message: &str) {
        self.append(format_log_line(Utc::now(), level, message));
    }
}

/// 有界日志缓冲
#[derive(Debug, Clone)]
pub struct BoundedLogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    dropped: u64,
}

impl BoundedLogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 因超出容量被丢弃的行数
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// 当前缓冲内容（从旧到新）
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// 取出全部内容并清空缓冲
    pub fn rotate(&mut self) -> Vec<String> {
        self.lines.drain(..).collect()
    }
}

impl Default for BoundedLogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl LogSink for BoundedLogBuffer {
    fn append(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.dropped += 1;
        }
        self.lines.push_back(line);
    }
}
