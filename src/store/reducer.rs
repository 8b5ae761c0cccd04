//! Reducer trait for feature slices.

use super::action::Action;
use super::state::SliceState;

/// Reducer transforms one slice based on the actions of its feature.
///
/// The reducer is the only place where slice transitions happen.
/// It must be a pure function: (State, Action) -> State
pub trait Reducer: Send + Sync + 'static {
    /// The slice this reducer owns.
    type State: SliceState;

    /// The action enum this reducer handles.
    type Action: Action;

    /// Process an action and return the next slice value.
    ///
    /// Returns `None` when the action leaves the slice untouched, so the
    /// store keeps the previous reference. Actions of other features never
    /// reach this method.
    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Option<Self::State>;
}
