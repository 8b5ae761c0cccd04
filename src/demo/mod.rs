//! Demo front end for the product management slices.
//!
//! The views here stand in for the UI components of the app: they subscribe
//! to selectors and record what they would render on a shared [`Screen`].
//! The data service plays the external effects layer that answers a load
//! request with a follow-up action.

mod args;
mod runner;
mod service;
mod views;

pub use args::{Cli, Step, StepParseError};
pub use runner::Demo;
pub use service::{ProductDataService, ServiceError};
pub use views::{LoginView, ProductListView, Screen};
