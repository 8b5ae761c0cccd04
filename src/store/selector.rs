//! Memoized selectors.
//!
//! A selector derives a read-only value from the [`RootState`]. Composed
//! selectors keep a single memo slot holding the input references of the last
//! projection and its result; the projection runs again only when one of those
//! inputs changed by reference. A projection equal to the memoized result hands
//! back the memoized reference, so selectors composed on top stay put.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::state::{RootState, SliceState};

trait SelectorFn<T>: Send + Sync {
    fn select(&self, state: &RootState) -> Arc<T>;
    fn recomputations(&self) -> u64;
    fn release(&self);
}

/// Shared handle to a selector.
///
/// Clones share the memo slot, so a selector built once can be handed to any
/// number of consumers.
pub struct Selector<T> {
    inner: Arc<dyn SelectorFn<T>>,
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> Selector<T> {
    /// Evaluate against a state tree.
    pub fn select(&self, state: &RootState) -> Arc<T> {
        self.inner.select(state)
    }

    /// How many times the projection has run.
    pub fn recomputations(&self) -> u64 {
        self.inner.recomputations()
    }

    /// Forget the memoized value; the next read recomputes.
    pub fn release(&self) {
        self.inner.release()
    }
}

impl<T: PartialEq + Send + Sync + 'static> Selector<T> {
    fn memoized<I, P>(inputs: I, project: P) -> Self
    where
        I: SelectorInputs,
        P: Fn(&I::Values) -> T + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(MemoSelector {
                inputs,
                project,
                memo: Mutex::new(None),
                recomputations: AtomicU64::new(0),
            }),
        }
    }
}

impl<T> std::fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("recomputations", &self.inner.recomputations())
            .finish()
    }
}

/// Selector projecting one feature slice out of the tree.
///
/// Until the slice is installed, it reads as a default value that stays the
/// same reference across reads.
pub fn create_feature_selector<S: SliceState>(name: impl Into<String>) -> Selector<S> {
    Selector {
        inner: Arc::new(FeatureSelector {
            name: name.into(),
            fallback: Arc::new(S::default()),
            mismatch_logged: AtomicBool::new(false),
        }),
    }
}

struct FeatureSelector<S> {
    name: String,
    fallback: Arc<S>,
    mismatch_logged: AtomicBool,
}

impl<S: SliceState> SelectorFn<S> for FeatureSelector<S> {
    fn select(&self, state: &RootState) -> Arc<S> {
        match state.slice::<S>(&self.name) {
            Some(slice) => slice,
            None => {
                let mismatched = state.contains(&self.name);
                if mismatched && !self.mismatch_logged.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        slice = %self.name,
                        expected = std::any::type_name::<S>(),
                        "Feature selector type does not match the installed slice"
                    );
                }
                Arc::clone(&self.fallback)
            }
        }
    }

    fn recomputations(&self) -> u64 {
        0
    }

    fn release(&self) {}
}

/// Tuple of input selectors evaluated together.
trait SelectorInputs: Send + Sync + 'static {
    type Values: Send + Sync + 'static;

    fn evaluate(&self, state: &RootState) -> Self::Values;

    /// Element-wise reference equality.
    fn same(previous: &Self::Values, next: &Self::Values) -> bool;
}

macro_rules! impl_selector_inputs {
    ($($ty:ident . $idx:tt),+) => {
        impl<$($ty: Send + Sync + 'static),+> SelectorInputs for ($(Selector<$ty>,)+) {
            type Values = ($(Arc<$ty>,)+);

            fn evaluate(&self, state: &RootState) -> Self::Values {
                ($(self.$idx.select(state),)+)
            }

            fn same(previous: &Self::Values, next: &Self::Values) -> bool {
                $(Arc::ptr_eq(&previous.$idx, &next.$idx))&&+
            }
        }
    };
}

impl_selector_inputs!(A.0);
impl_selector_inputs!(A.0, B.1);
impl_selector_inputs!(A.0, B.1, C.2);
impl_selector_inputs!(A.0, B.1, C.2, D.3);

struct Memo<V, T> {
    inputs: V,
    result: Arc<T>,
}

struct MemoSelector<I: SelectorInputs, T, P> {
    inputs: I,
    project: P,
    memo: Mutex<Option<Memo<I::Values, T>>>,
    recomputations: AtomicU64,
}

impl<I, T, P> SelectorFn<T> for MemoSelector<I, T, P>
where
    I: SelectorInputs,
    T: PartialEq + Send + Sync + 'static,
    P: Fn(&I::Values) -> T + Send + Sync + 'static,
{
    fn select(&self, state: &RootState) -> Arc<T> {
        let inputs = self.inputs.evaluate(state);

        let previous = match self.memo.lock().as_ref() {
            Some(memo) if I::same(&memo.inputs, &inputs) => return Arc::clone(&memo.result),
            Some(memo) => Some(Arc::clone(&memo.result)),
            None => None,
        };

        // The lock is not held while projecting; a panicking projection
        // leaves the previous memo in place.
        let value = (self.project)(&inputs);
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        let result = match previous {
            Some(previous) if *previous == value => previous,
            _ => Arc::new(value),
        };
        *self.memo.lock() = Some(Memo {
            inputs,
            result: Arc::clone(&result),
        });
        result
    }

    fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    fn release(&self) {
        *self.memo.lock() = None;
    }
}

/// Selector over one input.
pub fn create_selector<A, T, F>(a: &Selector<A>, project: F) -> Selector<T>
where
    A: Send + Sync + 'static,
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&A) -> T + Send + Sync + 'static,
{
    Selector::memoized((a.clone(),), move |values: &(Arc<A>,)| project(&values.0))
}

/// Selector over two inputs, passed to `project` in order.
pub fn create_selector2<A, B, T, F>(a: &Selector<A>, b: &Selector<B>, project: F) -> Selector<T>
where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&A, &B) -> T + Send + Sync + 'static,
{
    Selector::memoized(
        (a.clone(), b.clone()),
        move |values: &(Arc<A>, Arc<B>)| project(&values.0, &values.1),
    )
}

pub fn create_selector3<A, B, C, T, F>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    project: F,
) -> Selector<T>
where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
    C: Send + Sync + 'static,
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&A, &B, &C) -> T + Send + Sync + 'static,
{
    Selector::memoized(
        (a.clone(), b.clone(), c.clone()),
        move |values: &(Arc<A>, Arc<B>, Arc<C>)| project(&values.0, &values.1, &values.2),
    )
}

pub fn create_selector4<A, B, C, D, T, F>(
    a: &Selector<A>,
    b: &Selector<B>,
    c: &Selector<C>,
    d: &Selector<D>,
    project: F,
) -> Selector<T>
where
    A: Send + Sync + 'static,
    B: Send + Sync + 'static,
    C: Send + Sync + 'static,
    D: Send + Sync + 'static,
    T: PartialEq + Send + Sync + 'static,
    F: Fn(&A, &B, &C, &D) -> T + Send + Sync + 'static,
{
    Selector::memoized(
        (a.clone(), b.clone(), c.clone(), d.clone()),
        move |values: &(Arc<A>, Arc<B>, Arc<C>, Arc<D>)| {
            project(&values.0, &values.1, &values.2, &values.3)
        },
    )
}
