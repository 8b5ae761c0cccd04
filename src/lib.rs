//! Predictable state container with lazily registered feature slices.
//!
//! A single immutable state tree is updated only through pure reducers,
//! triggered by tagged actions, and observed through memoized selectors.
//! See [`store`] for the container itself and [`features`] for the
//! product management slices built on it.

pub mod config;
pub mod demo;
pub mod features;
pub mod logging;
pub mod store;
