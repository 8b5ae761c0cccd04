//! The store: current state, dispatch loop and listener fan-out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};

use crate::config::StoreConfig;

use super::action::{Action, ActionCatalog, ActionRef, StoreAction};
use super::error::StoreError;
use super::reducer::Reducer;
use super::registry::{ReducerRegistry, SliceEntry};
use super::select::Select;
use super::selector::Selector;
use super::state::{RootState, SliceState};
use super::subscription::{ListenerList, Subscription};

/// Handle to a state container.
///
/// Cloning is cheap; every clone talks to the same state tree. Consumers
/// receive a handle explicitly, there is no global store.
///
/// Dispatch is synchronous and strictly sequential: reducers and listeners
/// run to completion before [`Store::dispatch`] returns, and any dispatch
/// attempted meanwhile fails with [`StoreError::InvalidDispatch`].
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    config: StoreConfig,
    state: RwLock<RootState>,
    registry: RwLock<Arc<ReducerRegistry>>,
    catalog: Mutex<ActionCatalog>,
    listeners: Arc<Mutex<ListenerList>>,
    dispatching: AtomicBool,
}

/// Non-owning store handle, held by listeners that must not keep the store alive.
#[derive(Clone)]
pub(crate) struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub(crate) fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl Store {
    /// Create a store over a pre-composed registry with default settings.
    ///
    /// # Errors
    /// See [`Store::with_config`].
    pub fn new(registry: ReducerRegistry) -> Result<Self, StoreError> {
        Self::with_config(StoreConfig::default(), registry)
    }

    /// Create a store and run the init action once, so every slice of
    /// `registry` holds its initial state.
    ///
    /// # Errors
    /// Returns [`StoreError::ConflictingActionType`] when two slices declare
    /// the same tag with different action types (strict checks only), or
    /// [`StoreError::ReducerPanicked`] if a reducer panics during init.
    pub fn with_config(config: StoreConfig, registry: ReducerRegistry) -> Result<Self, StoreError> {
        let mut catalog = ActionCatalog::default();
        if config.runtime_checks.strict_action_types {
            catalog.declare::<StoreAction>()?;
            for entry in registry.entries() {
                entry.declare_actions(&mut catalog)?;
            }
        }

        let store = Self {
            inner: Arc::new(StoreInner {
                config,
                state: RwLock::new(RootState::default()),
                registry: RwLock::new(Arc::new(registry)),
                catalog: Mutex::new(catalog),
                listeners: Arc::new(Mutex::new(ListenerList::default())),
                dispatching: AtomicBool::new(false),
            }),
        };

        tracing::debug!(
            store = %store.inner.config.store.name,
            slices = store.inner.registry.read().len(),
            "Store created"
        );
        store.dispatch(StoreAction::Init)?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Current state reference.
    pub fn get_state(&self) -> RootState {
        self.inner.state.read().clone()
    }

    /// Snapshot read of one slice.
    pub fn slice<S: SliceState>(&self, name: &str) -> Option<Arc<S>> {
        self.get_state().slice(name)
    }

    pub fn has_slice(&self, name: &str) -> bool {
        self.inner.registry.read().contains(name)
    }

    /// Names of the registered slices, sorted.
    pub fn slice_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .registry
            .read()
            .entries()
            .map(|entry| entry.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Number of registered listeners, select runs included.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// True while a dispatch is running.
    pub fn is_dispatching(&self) -> bool {
        self.inner.dispatching.load(Ordering::Acquire)
    }

    /// Submit an action.
    ///
    /// Runs the root reducer over the current state. When the result differs
    /// by reference, the new state is installed and every subscribed listener
    /// runs, in registration order. Otherwise nobody is notified.
    ///
    /// # Errors
    /// - [`StoreError::InvalidDispatch`] if a dispatch is already in flight
    /// - [`StoreError::ReducerPanicked`] if a slice reducer panics
    /// - [`StoreError::ConflictingActionType`] if `A` reuses a tag owned by
    ///   another action type (strict checks only)
    ///
    /// The state is unchanged whenever an error is returned.
    pub fn dispatch<A: Action>(&self, action: A) -> Result<(), StoreError> {
        let _in_flight = self.begin(action.action_type())?;
        if self.inner.config.runtime_checks.strict_action_types {
            self.inner.catalog.lock().declare::<A>()?;
        }
        self.apply(ActionRef::new(&action))
    }

    /// Register a feature slice at runtime.
    ///
    /// The new slice's initial state is installed before this returns, and
    /// listeners are notified of that transition.
    ///
    /// # Errors
    /// - [`StoreError::DuplicateSlice`] if `name` is taken; the existing
    ///   slice is untouched
    /// - [`StoreError::InvalidDispatch`] if called while a dispatch is in flight
    /// - [`StoreError::ConflictingActionType`] if the slice's actions clash
    ///   with already-known ones (strict checks only)
    /// - [`StoreError::ReducerPanicked`] if a reducer panics on the
    ///   registration action; the slice and its action tags are rolled back
    pub fn register_slice<R: Reducer>(
        &self,
        name: impl Into<String>,
        reducer: R,
        initial_state: R::State,
    ) -> Result<(), StoreError> {
        let name = name.into();
        let action = StoreAction::UpdateReducers {
            feature: name.clone(),
        };
        let _in_flight = self.begin(action.action_type())?;

        let previous_catalog = {
            let mut registry = self.inner.registry.write();
            if registry.contains(&name) {
                tracing::warn!(slice = %name, "Rejected duplicate slice registration");
                return Err(StoreError::DuplicateSlice { name });
            }
            let entry = SliceEntry::new(name.clone(), reducer, initial_state);
            let previous_catalog = if self.inner.config.runtime_checks.strict_action_types {
                let mut catalog = self.inner.catalog.lock();
                let previous = catalog.clone();
                entry.declare_actions(&mut catalog)?;
                Some(previous)
            } else {
                None
            };
            Arc::make_mut(&mut *registry).insert(entry)?;
            previous_catalog
        };

        if let Err(err) = self.apply(ActionRef::new(&action)) {
            Arc::make_mut(&mut *self.inner.registry.write()).remove(&name);
            if let Some(catalog) = previous_catalog {
                *self.inner.catalog.lock() = catalog;
            }
            tracing::warn!(slice = %name, error = %err, "Rolled back slice registration");
            return Err(err);
        }
        tracing::info!(slice = %name, "Registered feature slice");
        Ok(())
    }

    /// Register a listener, run after every state change.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        ListenerList::add(&self.inner.listeners, Arc::new(listener))
    }

    /// Observable of a selector's value over time.
    pub fn select<T: Send + Sync + 'static>(&self, selector: &Selector<T>) -> Select<T> {
        Select::new(self.clone(), selector.clone())
    }

    pub(crate) fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Claim the in-flight flag; released when the guard drops, panics included.
    fn begin(
        &self,
        action_type: &'static str,
    ) -> Result<scopeguard::ScopeGuard<&AtomicBool, fn(&AtomicBool)>, StoreError> {
        let flag = &self.inner.dispatching;
        if flag.swap(true, Ordering::AcqRel) {
            tracing::warn!(
                action = action_type,
                "Rejected dispatch while another dispatch is in progress"
            );
            return Err(StoreError::InvalidDispatch {
                action_type: action_type.to_string(),
            });
        }
        let release: fn(&AtomicBool) = |flag| flag.store(false, Ordering::Release);
        Ok(scopeguard::guard(flag, release))
    }

    fn apply(&self, action: ActionRef<'_>) -> Result<(), StoreError> {
        let started = Instant::now();
        let current = self.get_state();
        // Reducers run against a snapshot; no lock is held while they do.
        let registry = Arc::clone(&*self.inner.registry.read());
        let next = registry.reduce_erased(&current, action)?;

        if next.ptr_eq(&current) {
            tracing::debug!(action = action.action_type(), changed = false, "Dispatched");
            return Ok(());
        }

        *self.inner.state.write() = next;

        let listeners = self.inner.listeners.lock().snapshot();
        tracing::debug!(
            action = action.action_type(),
            changed = true,
            listeners = listeners.len(),
            "Dispatched"
        );
        for slot in &listeners {
            slot.notify();
        }
        tracing::trace!(action = action.action_type(), "Listeners notified");

        self.warn_if_slow(action.action_type(), started.elapsed());
        Ok(())
    }

    fn warn_if_slow(&self, action_type: &str, elapsed: Duration) {
        let threshold_ms = self.inner.config.store.slow_dispatch_warn_ms;
        if threshold_ms > 0 && elapsed > Duration::from_millis(threshold_ms) {
            tracing::warn!(
                action = action_type,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms,
                "Slow dispatch"
            );
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.config.store.name)
            .field("state", &self.get_state())
            .finish()
    }
}
