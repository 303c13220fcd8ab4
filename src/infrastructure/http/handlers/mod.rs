//! HTTP Handlers

mod edit;
mod page;
mod ping;

pub use edit::*;
pub use page::*;
pub use ping::*;
