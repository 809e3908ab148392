/// Which affordances of the form are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl SubmissionState {
    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }
}

/// How long the "Copied!" indication stays up after a copy.
pub const COPIED_DISPLAY_MILLIS: u64 = 2_500;
