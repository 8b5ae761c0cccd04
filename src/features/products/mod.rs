mod action;
mod reducer;
mod selectors;
mod state;

pub use action::ProductAction;
pub use reducer::ProductReducer;
pub use selectors::ProductSelectors;
pub use state::{Product, ProductState};

use crate::store::{Store, StoreError};

/// Slice name of the products feature.
pub const FEATURE: &str = "products";

/// Lazily register the products slice with its initial state.
pub fn register(store: &Store) -> Result<(), StoreError> {
    store.register_slice(FEATURE, ProductReducer, ProductState::default())
}
