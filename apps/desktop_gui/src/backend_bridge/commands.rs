//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Shorten { generation: u64, url: String },
    /// Abort whatever request is in flight.
    Cancel,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shorten { .. } => "shorten",
            Self::Cancel => "cancel",
        }
    }
}
