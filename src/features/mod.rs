//! Feature slices of the product management app.
//!
//! Each feature owns one slice of the state tree and registers it lazily
//! through its `register` function.

pub mod products;
pub mod users;
