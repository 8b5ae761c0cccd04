//! Small slices shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use slicestore::store::{combine, Reducer, SliceEntry, SliceState, Store};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Counter {
    pub count: i64,
}

impl SliceState for Counter {}

slicestore::actions! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum CounterAction {
        Increment = "[Counter] Increment",
        Add { amount: i64 } = "[Counter] Add",
        Reset = "[Counter] Reset",
        Explode = "[Counter] Explode",
    }
}

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = Counter;
    type Action = CounterAction;

    fn reduce(&self, state: &Counter, action: &CounterAction) -> Option<Counter> {
        match action {
            CounterAction::Increment => Some(Counter {
                count: state.count + 1,
            }),
            CounterAction::Add { amount } => Some(Counter {
                count: state.count + amount,
            }),
            CounterAction::Reset => Some(Counter::default()),
            CounterAction::Explode => panic!("counter exploded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flags {
    pub x: bool,
}

impl SliceState for Flags {}

slicestore::actions! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum FlagAction {
        ToggleX = "Toggle X",
    }
}

pub struct FlagReducer;

impl Reducer for FlagReducer {
    type State = Flags;
    type Action = FlagAction;

    fn reduce(&self, state: &Flags, action: &FlagAction) -> Option<Flags> {
        match action {
            FlagAction::ToggleX => Some(Flags { x: !state.x }),
        }
    }
}

slicestore::actions! {
    /// Handled by no reducer in these tests.
    #[derive(Debug, Clone, PartialEq)]
    pub enum StrayAction {
        Ping = "[Elsewhere] Ping",
    }
}

/// Store with a "counter" slice (count 0) and a "flags" slice (x = true).
pub fn counter_and_flags() -> Store {
    Store::new(
        combine([
            SliceEntry::new("counter", CounterReducer, Counter::default()),
            SliceEntry::new("flags", FlagReducer, Flags { x: true }),
        ])
        .unwrap(),
    )
    .unwrap()
}

/// Listener that counts its calls.
pub fn counting_listener() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let listener_calls = Arc::clone(&calls);
    (calls, move || {
        listener_calls.fetch_add(1, Ordering::SeqCst);
    })
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
