use thiserror::Error;

/// Errors surfaced by the store.
///
/// In every case the state tree is left exactly as it was before the
/// failing call.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A dispatch was attempted while another one is in flight.
    #[error("Cannot dispatch '{action_type}': a dispatch is already in progress")]
    InvalidDispatch { action_type: String },

    /// A slice with this name is already registered.
    #[error("Slice '{name}' is already registered")]
    DuplicateSlice { name: String },

    /// A slice reducer panicked; the whole dispatch was abandoned.
    #[error("Reducer for slice '{slice}' panicked on '{action_type}': {message}")]
    ReducerPanicked {
        slice: String,
        action_type: String,
        message: String,
    },

    /// Two different action types declare the same tag.
    #[error("Action type '{action_type}' is declared by both {existing} and {conflicting}")]
    ConflictingActionType {
        action_type: String,
        existing: &'static str,
        conflicting: &'static str,
    },
}
