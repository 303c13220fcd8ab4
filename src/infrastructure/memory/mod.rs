//! In-Memory Implementations
//!
//! 会话只保存在进程内存中

mod session_store;

pub use session_store::InMemorySessionStore;
