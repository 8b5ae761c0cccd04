//! Unidirectional state container.
//!
//! This module provides the store, the reducer registry that composes
//! independently-registered feature slices, and memoized selectors.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store::dispatch ──→ ReducerRegistry ──→ RootState
//!    ↑                                                  │
//!    │                                     Selector (memoized)
//!    │                                                  │
//!    └──────────── external collaborators ←─── Select stream
//! ```
//!
//! - **Action**: a tagged message, one closed enum per feature
//! - **Reducer**: pure function `(slice, action) -> slice`
//! - **RootState**: immutable map from slice name to slice value
//! - **Selector**: derived read-view, recomputed only when its inputs change

mod action;
mod engine;
mod error;
mod reducer;
mod registry;
mod select;
mod selector;
mod state;
mod subscription;

pub use action::{Action, StoreAction};
pub use engine::Store;
pub use error::StoreError;
pub use reducer::Reducer;
pub use registry::{combine, ReducerRegistry, SliceEntry};
pub use select::{Select, Watch};
pub use selector::{
    create_feature_selector, create_selector, create_selector2, create_selector3,
    create_selector4, Selector,
};
pub use state::{RootState, SliceState};
pub use subscription::Subscription;
