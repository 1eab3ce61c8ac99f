use looping_selector::SelectorError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AutomationError {
    /// The request makes no sense for a single-selection, vertical-only list.
    #[error("invalid automation operation: {0}")]
    InvalidOperation(&'static str),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

pub type Result<T, E = AutomationError> = core::result::Result<T, E>;
