//! Composition of feature reducers into one root reducer.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use super::action::{Action, ActionCatalog, ActionRef};
use super::error::StoreError;
use super::reducer::Reducer;
use super::state::{RootState, SliceValue};

/// Object-safe wrapper around a typed [`Reducer`].
trait ErasedReducer: Send + Sync {
    fn initial(&self) -> SliceValue;

    /// `None` means the slice keeps its current reference.
    fn reduce(&self, state: &SliceValue, action: ActionRef<'_>) -> Option<SliceValue>;

    fn declare_actions(&self, catalog: &mut ActionCatalog) -> Result<(), StoreError>;
}

struct TypedReducer<R: Reducer> {
    reducer: R,
    initial: Arc<R::State>,
}

impl<R: Reducer> ErasedReducer for TypedReducer<R> {
    fn initial(&self) -> SliceValue {
        self.initial.clone()
    }

    fn reduce(&self, state: &SliceValue, action: ActionRef<'_>) -> Option<SliceValue> {
        let action = action.downcast::<R::Action>()?;
        let current = state.as_any().downcast_ref::<R::State>()?;
        let next = self.reducer.reduce(current, action)?;
        if next == *current {
            return None;
        }
        Some(Arc::new(next))
    }

    fn declare_actions(&self, catalog: &mut ActionCatalog) -> Result<(), StoreError> {
        catalog.declare::<R::Action>()
    }
}

/// One named feature slice: its reducer and its initial state.
#[derive(Clone)]
pub struct SliceEntry {
    name: String,
    reducer: Arc<dyn ErasedReducer>,
}

impl SliceEntry {
    pub fn new<R: Reducer>(name: impl Into<String>, reducer: R, initial_state: R::State) -> Self {
        Self {
            name: name.into(),
            reducer: Arc::new(TypedReducer {
                reducer,
                initial: Arc::new(initial_state),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn declare_actions(&self, catalog: &mut ActionCatalog) -> Result<(), StoreError> {
        self.reducer.declare_actions(catalog)
    }
}

/// Root reducer over the whole state tree.
///
/// Every registered slice sees every action; slices whose action enum does
/// not match leave their value untouched. A new [`RootState`] is built only
/// when at least one slice changed by reference.
#[derive(Clone, Default)]
pub struct ReducerRegistry {
    slices: Vec<SliceEntry>,
}

/// Compose named slice reducers into one registry.
///
/// # Errors
/// Returns [`StoreError::DuplicateSlice`] if two entries share a name.
pub fn combine(slices: impl IntoIterator<Item = SliceEntry>) -> Result<ReducerRegistry, StoreError> {
    let mut registry = ReducerRegistry::new();
    for entry in slices {
        registry.insert(entry)?;
    }
    Ok(registry)
}

impl ReducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slice.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateSlice`] if the name is taken; the
    /// registry is unchanged in that case.
    pub fn insert(&mut self, entry: SliceEntry) -> Result<(), StoreError> {
        if self.contains(&entry.name) {
            return Err(StoreError::DuplicateSlice { name: entry.name });
        }
        self.slices.push(entry);
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.slices.retain(|entry| entry.name != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slices.iter().any(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &SliceEntry> {
        self.slices.iter()
    }

    /// Apply `action` to every slice of `state`.
    ///
    /// Returns `state` itself (same reference) when no slice changed.
    ///
    /// # Errors
    /// Returns [`StoreError::ReducerPanicked`] if any slice reducer panics.
    /// No partial result escapes in that case.
    pub fn reduce<A: Action>(&self, state: &RootState, action: &A) -> Result<RootState, StoreError> {
        self.reduce_erased(state, ActionRef::new(action))
    }

    pub(crate) fn reduce_erased(
        &self,
        state: &RootState,
        action: ActionRef<'_>,
    ) -> Result<RootState, StoreError> {
        let mut changed: Vec<(&str, SliceValue)> = Vec::new();

        for entry in &self.slices {
            let current = state.raw(&entry.name);
            let outcome = catch_unwind(AssertUnwindSafe(|| match current {
                Some(value) => entry.reducer.reduce(value, action),
                // Absent slices start from their initial state and are always installed.
                None => {
                    let initial = entry.reducer.initial();
                    Some(entry.reducer.reduce(&initial, action).unwrap_or(initial))
                }
            }));

            match outcome {
                Ok(Some(next)) => changed.push((entry.name.as_str(), next)),
                Ok(None) => {}
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::warn!(
                        slice = %entry.name,
                        action = action.action_type(),
                        %message,
                        "Reducer panicked, dispatch abandoned"
                    );
                    return Err(StoreError::ReducerPanicked {
                        slice: entry.name.clone(),
                        action_type: action.action_type().to_string(),
                        message,
                    });
                }
            }
        }

        if changed.is_empty() {
            return Ok(state.clone());
        }

        let mut slices = state.to_slices();
        for (name, value) in changed {
            slices.insert(name.to_string(), value);
        }
        Ok(RootState::from_slices(slices))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
