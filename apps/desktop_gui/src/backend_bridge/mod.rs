//! Bridge between the UI thread and the backend worker that talks to the shortening service.

pub mod commands;
pub mod runtime;
