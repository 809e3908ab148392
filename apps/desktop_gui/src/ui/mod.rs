//! UI layer for desktop GUI: app shell and the system clipboard.

pub mod app;
pub mod clipboard;

pub use app::ShortenerApp;
