//! The state tree.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Marker trait for the value of one feature slice.
///
/// Slice values should be:
/// - Immutable (Clone to create new values)
/// - Comparable (PartialEq lets the registry keep the old reference on no-op updates)
/// - Defaultable (feature selectors read a default before the slice is installed)
pub trait SliceState: Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static {}

/// Object-safe face of a [`SliceState`] stored in the tree.
pub(crate) trait AnySlice: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<S: SliceState> AnySlice for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

pub(crate) type SliceValue = Arc<dyn AnySlice>;

/// Immutable mapping from slice name to slice value.
///
/// Cloning is cheap and yields the same reference: [`RootState::ptr_eq`]
/// holds between a state and its clones. The registry builds a new tree only
/// when at least one slice changed.
#[derive(Clone, Default)]
pub struct RootState {
    slices: Arc<HashMap<String, SliceValue>>,
}

impl RootState {
    pub(crate) fn from_slices(slices: HashMap<String, SliceValue>) -> Self {
        Self {
            slices: Arc::new(slices),
        }
    }

    /// Reference identity of two state trees.
    pub fn ptr_eq(&self, other: &RootState) -> bool {
        Arc::ptr_eq(&self.slices, &other.slices)
    }

    /// Typed read of one slice.
    ///
    /// Returns `None` when the slice is not installed or holds another type.
    pub fn slice<S: SliceState>(&self, name: &str) -> Option<Arc<S>> {
        self.slices
            .get(name)
            .and_then(|value| Arc::clone(value).into_any().downcast::<S>().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slices.contains_key(name)
    }

    /// Slice names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slices.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub(crate) fn raw(&self, name: &str) -> Option<&SliceValue> {
        self.slices.get(name)
    }

    /// Copy of the slice map for building the next tree.
    pub(crate) fn to_slices(&self) -> HashMap<String, SliceValue> {
        self.slices.as_ref().clone()
    }
}

impl fmt::Debug for RootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.names() {
            map.entry(&name, &self.slices[&name]);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Lamp {
        on: bool,
    }

    impl SliceState for Lamp {}

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Dial(u8);

    impl SliceState for Dial {}

    fn tree() -> RootState {
        let mut slices: HashMap<String, SliceValue> = HashMap::new();
        slices.insert("lamp".to_string(), Arc::new(Lamp { on: true }));
        slices.insert("dial".to_string(), Arc::new(Dial(2)));
        RootState::from_slices(slices)
    }

    #[test]
    fn typed_read_returns_the_installed_value() {
        let state = tree();
        assert_eq!(state.slice::<Lamp>("lamp").as_deref(), Some(&Lamp { on: true }));
    }

    #[test]
    fn typed_read_with_wrong_type_is_none() {
        let state = tree();
        assert!(state.slice::<Dial>("lamp").is_none());
        assert!(state.slice::<Lamp>("dial").is_none());
        assert_eq!(state.slice::<Dial>("dial").as_deref(), Some(&Dial(2)));
        assert!(state.slice::<Lamp>("missing").is_none());
    }

    #[test]
    fn clones_share_identity() {
        let state = tree();
        let copy = state.clone();
        assert!(state.ptr_eq(&copy));
        assert!(!state.ptr_eq(&tree()));
    }

    #[test]
    fn repeated_reads_return_the_same_slice_reference() {
        let state = tree();
        let a = state.slice::<Lamp>("lamp").unwrap();
        let b = state.slice::<Lamp>("lamp").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn debug_lists_slices_by_name() {
        let rendered = format!("{:?}", tree());
        assert_eq!(rendered, r#"{"dial": Dial(2), "lamp": Lamp { on: true }}"#);
    }
}
