//! Observable streams of selector values.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::engine::Store;
use super::selector::Selector;
use super::subscription::Subscription;

type Equality<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// A selector bound to a store.
///
/// Nothing runs until [`Select::subscribe`] or [`Select::watch`]; each of
/// those starts an independent run that emits the current value right away
/// and then only values that differ from the previous emission.
pub struct Select<T> {
    store: Store,
    selector: Selector<T>,
    equality: Option<Equality<T>>,
}

impl<T> Clone for Select<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            selector: self.selector.clone(),
            equality: self.equality.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Select<T> {
    pub(crate) fn new(store: Store, selector: Selector<T>) -> Self {
        Self {
            store,
            selector,
            equality: None,
        }
    }

    /// Also suppress emissions that `equal` considers unchanged.
    ///
    /// Values that are the same reference are never re-emitted.
    pub fn distinct_by(mut self, equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        self.equality = Some(Arc::new(equal));
        self
    }

    /// Suppress emissions equal to the previous one by value.
    pub fn distinct_until_changed(self) -> Self
    where
        T: PartialEq,
    {
        self.distinct_by(|previous, next| previous == next)
    }

    /// The selector's value for the current state.
    pub fn current(&self) -> Arc<T> {
        self.selector.select(&self.store.get_state())
    }

    /// Start a run that calls `observer` for every emitted value.
    pub fn subscribe(&self, mut observer: impl FnMut(&T) + Send + 'static) -> Subscription {
        self.subscribe_shared(move |value: &Arc<T>| observer(value))
    }

    /// Start a run whose values are buffered for pulling.
    pub fn watch(&self) -> Watch<T> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let subscription = self.subscribe_shared(move |value: &Arc<T>| {
            // The receiver lives in the Watch that also owns this subscription.
            let _ = sender.send(Arc::clone(value));
        });
        Watch {
            receiver,
            subscription,
        }
    }

    fn subscribe_shared(&self, observer: impl FnMut(&Arc<T>) + Send + 'static) -> Subscription {
        let emitter = Arc::new(Emitter {
            observer: Mutex::new(observer),
            last: Mutex::new(None),
            equality: self.equality.clone(),
        });

        emitter.offer(self.current());

        let store = self.store.downgrade();
        let selector = self.selector.clone();
        self.store.subscribe(move || {
            if let Some(store) = store.upgrade() {
                emitter.offer(selector.select(&store.get_state()));
            }
        })
    }
}

struct Emitter<T, O> {
    observer: Mutex<O>,
    last: Mutex<Option<Arc<T>>>,
    equality: Option<Equality<T>>,
}

impl<T, O: FnMut(&Arc<T>)> Emitter<T, O> {
    fn offer(&self, value: Arc<T>) {
        {
            let mut last = self.last.lock();
            if let Some(previous) = last.as_ref() {
                let unchanged = Arc::ptr_eq(previous, &value)
                    || self
                        .equality
                        .as_ref()
                        .is_some_and(|equal| equal(previous, &value));
                if unchanged {
                    return;
                }
            }
            *last = Some(Arc::clone(&value));
        }
        let mut observer = self.observer.lock();
        (&mut *observer)(&value);
    }
}

/// Pull side of a [`Select`] run.
///
/// Values queue up as the store changes; read them with [`Watch::try_next`],
/// [`Watch::drain`] or as a [`Stream`]. Dropping the watch unsubscribes, and
/// the stream ends once the subscription is gone.
pub struct Watch<T> {
    receiver: mpsc::UnboundedReceiver<Arc<T>>,
    subscription: Subscription,
}

impl<T> Watch<T> {
    /// Next queued value, if any.
    pub fn try_next(&mut self) -> Option<Arc<T>> {
        self.receiver.try_recv().ok()
    }

    /// Every queued value, oldest first.
    pub fn drain(&mut self) -> Vec<Arc<T>> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    pub fn unsubscribe(&self) {
        self.subscription.unsubscribe();
    }
}

impl<T> Stream for Watch<T> {
    type Item = Arc<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
