mod common;

use std::future::poll_fn;
use std::pin::Pin;
use std::sync::Arc;

use futures_core::Stream;
use parking_lot::Mutex;

use common::fixtures::{counter_and_flags, Counter, CounterAction, FlagAction};
use slicestore::features::products::{self, Product, ProductAction, ProductSelectors};
use slicestore::store::{
    create_feature_selector, create_selector, ReducerRegistry, Selector, Store, Watch,
};

fn count_selector() -> Selector<i64> {
    let counter = create_feature_selector::<Counter>("counter");
    create_selector(&counter, |c: &Counter| c.count)
}

fn positive_selector() -> Selector<bool> {
    let counter = create_feature_selector::<Counter>("counter");
    create_selector(&counter, |c: &Counter| c.count > 0)
}

fn hammer() -> Product {
    Product {
        id: 5,
        product_name: "Hammer".to_string(),
        product_code: "TBX-0048".to_string(),
        description: "Curved claw steel hammer".to_string(),
        star_rating: 4.8,
    }
}

async fn next<T>(watch: &mut Watch<T>) -> Option<Arc<T>> {
    poll_fn(|cx| Pin::new(&mut *watch).poll_next(cx)).await
}

#[test]
fn subscribe_emits_the_current_value_first() {
    let store = counter_and_flags();
    store.dispatch(CounterAction::Add { amount: 7 }).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let _subscription = store.select(&count_selector()).subscribe({
        let seen = Arc::clone(&seen);
        move |count: &i64| seen.lock().push(*count)
    });

    assert_eq!(*seen.lock(), vec![7]);
}

#[test]
fn emits_only_when_the_selected_value_changes() {
    let store = counter_and_flags();
    let mut watch = store.select(&count_selector()).watch();

    store.dispatch(FlagAction::ToggleX).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(FlagAction::ToggleX).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();

    let values: Vec<i64> = watch.drain().iter().map(|v| **v).collect();
    assert_eq!(values, vec![0, 1, 2]);
}

#[test]
fn recomputed_equal_values_are_not_emitted_again() {
    let store = counter_and_flags();
    let mut watch = store.select(&positive_selector()).watch();

    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(FlagAction::ToggleX).unwrap();

    let values: Vec<bool> = watch.drain().iter().map(|v| **v).collect();
    assert_eq!(values, vec![false, true]);
}

#[test]
fn field_of_a_feature_is_emitted_once_per_change() {
    let store = Store::new(ReducerRegistry::new()).unwrap();
    products::register(&store).unwrap();
    let selectors = ProductSelectors::new();
    let mut watch = store.select(&selectors.show_product_code).watch();

    store.dispatch(ProductAction::ToggleProductCode).unwrap();
    store
        .dispatch(ProductAction::LoadSuccess {
            products: vec![hammer()],
        })
        .unwrap();
    store
        .dispatch(ProductAction::SetCurrentProduct { product: hammer() })
        .unwrap();

    let values: Vec<bool> = watch.drain().iter().map(|v| **v).collect();
    assert_eq!(values, vec![true, false]);
}

#[test]
fn distinct_until_changed_suppresses_equal_values() {
    let store = counter_and_flags();
    let mut watch = store
        .select(&positive_selector())
        .distinct_until_changed()
        .watch();

    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(CounterAction::Reset).unwrap();

    let values: Vec<bool> = watch.drain().iter().map(|v| **v).collect();
    assert_eq!(values, vec![false, true, false]);
}

#[test]
fn distinct_by_uses_the_given_comparison() {
    let store = counter_and_flags();
    let mut watch = store
        .select(&count_selector())
        .distinct_by(|previous, next| previous / 10 == next / 10)
        .watch();

    store.dispatch(CounterAction::Add { amount: 4 }).unwrap();
    store.dispatch(CounterAction::Add { amount: 8 }).unwrap();
    store.dispatch(CounterAction::Add { amount: 1 }).unwrap();

    let values: Vec<i64> = watch.drain().iter().map(|v| **v).collect();
    assert_eq!(values, vec![0, 12]);
}

#[test]
fn each_run_is_independent() {
    let store = counter_and_flags();
    let select = store.select(&count_selector());

    let mut early = select.watch();
    store.dispatch(CounterAction::Increment).unwrap();
    let mut late = select.watch();
    store.dispatch(CounterAction::Increment).unwrap();

    assert_eq!(early.drain().len(), 3);
    assert_eq!(late.drain().len(), 2);
    assert_eq!(*select.current(), 2);
}

#[test]
fn dropping_the_watch_unsubscribes() {
    let store = counter_and_flags();
    let select = store.select(&count_selector());
    assert_eq!(store.listener_count(), 0);

    let watch = select.watch();
    assert_eq!(store.listener_count(), 1);

    drop(watch);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn nothing_runs_before_subscribing() {
    let store = counter_and_flags();
    let count = count_selector();

    let _select = store.select(&count);

    assert_eq!(count.recomputations(), 0);
    assert_eq!(store.listener_count(), 0);
}

#[tokio::test]
async fn watch_is_a_stream() {
    let store = counter_and_flags();
    let mut watch = store.select(&count_selector()).watch();

    store.dispatch(CounterAction::Add { amount: 5 }).unwrap();

    assert_eq!(next(&mut watch).await.as_deref(), Some(&0));
    assert_eq!(next(&mut watch).await.as_deref(), Some(&5));
}

#[tokio::test]
async fn stream_ends_after_unsubscribe() {
    let store = counter_and_flags();
    let mut watch = store.select(&count_selector()).watch();
    store.dispatch(CounterAction::Increment).unwrap();

    watch.unsubscribe();
    store.dispatch(CounterAction::Increment).unwrap();

    assert_eq!(next(&mut watch).await.as_deref(), Some(&0));
    assert_eq!(next(&mut watch).await.as_deref(), Some(&1));
    assert_eq!(next(&mut watch).await, None);
}
