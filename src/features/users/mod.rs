mod action;
mod reducer;
mod selectors;
mod state;

pub use action::UserAction;
pub use reducer::UserReducer;
pub use selectors::UserSelectors;
pub use state::{User, UserState};

use crate::store::{Store, StoreError};

/// Slice name of the users feature.
pub const FEATURE: &str = "users";

/// Lazily register the users slice with its initial state.
pub fn register(store: &Store) -> Result<(), StoreError> {
    store.register_slice(FEATURE, UserReducer, UserState::default())
}
