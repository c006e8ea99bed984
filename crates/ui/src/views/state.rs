#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A quiz action arrived in a state that cannot accept it.
    InvalidAction,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::InvalidAction => "That action is not available right now.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
