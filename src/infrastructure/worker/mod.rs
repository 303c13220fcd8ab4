//! Worker Layer - Background Task Processing
//!
//! 实现 SessionGcWorker，定期清理空闲会话

mod session_gc;

pub use session_gc::{SessionGcConfig, SessionGcWorker};
