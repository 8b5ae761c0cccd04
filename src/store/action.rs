//! Action contracts.

use std::any::{type_name, Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::StoreError;

/// A tagged message describing an intended state change.
///
/// Each feature declares one closed enum of actions, usually through the
/// [`actions!`](crate::actions) macro. Every variant is bound to exactly one
/// type tag, and the variant's fields are the payload for that tag.
pub trait Action: fmt::Debug + Send + Sync + 'static {
    /// The tag of this action, e.g. `"[Product] Load Success"`.
    fn action_type(&self) -> &'static str;

    /// Every tag this action type can carry.
    fn declared_types() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Declares a closed action enum and binds every variant to its type tag.
///
/// ```ignore
/// slicestore::actions! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum CounterAction {
///         Increment = "[Counter] Increment",
///         Add { amount: i64 } = "[Counter] Add",
///     }
/// }
/// ```
#[macro_export]
macro_rules! actions {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $({ $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)? })? = $tag:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $({ $( $(#[$fmeta])* $field: $ty ),* })?
            ),*
        }

        impl $crate::store::Action for $name {
            fn action_type(&self) -> &'static str {
                match self {
                    $( Self::$variant { .. } => $tag ),*
                }
            }

            fn declared_types() -> &'static [&'static str] {
                &[$($tag),*]
            }
        }
    };
}

crate::actions! {
    /// Actions the store dispatches on its own. Feature reducers normally
    /// ignore them; slices without a value get their initial state.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreAction {
        /// Root registration, dispatched once by [`Store::new`](super::Store::new).
        Init = "@slicestore/init",
        /// A feature slice was registered at runtime.
        UpdateReducers { feature: String } = "@slicestore/update-reducers",
    }
}

/// Type-erased view of an action as it travels through the registry.
#[derive(Clone, Copy)]
pub(crate) struct ActionRef<'a> {
    action_type: &'static str,
    payload: &'a dyn Any,
}

impl<'a> ActionRef<'a> {
    pub(crate) fn new<A: Action>(action: &'a A) -> Self {
        Self {
            action_type: action.action_type(),
            payload: action,
        }
    }

    pub(crate) fn action_type(&self) -> &'static str {
        self.action_type
    }

    pub(crate) fn downcast<A: Action>(&self) -> Option<&'a A> {
        self.payload.downcast_ref::<A>()
    }
}

#[derive(Debug, Clone, Copy)]
struct ActionOwner {
    type_id: TypeId,
    type_name: &'static str,
}

/// Tracks which Rust type owns each action tag.
///
/// A tag belongs to the first action type that declares it; any other type
/// declaring the same tag is rejected.
#[derive(Debug, Clone, Default)]
pub(crate) struct ActionCatalog {
    owners: HashMap<&'static str, ActionOwner>,
    seen: HashSet<TypeId>,
}

impl ActionCatalog {
    pub(crate) fn declare<A: Action>(&mut self) -> Result<(), StoreError> {
        let type_id = TypeId::of::<A>();
        if self.seen.contains(&type_id) {
            return Ok(());
        }

        let owner = ActionOwner {
            type_id,
            type_name: type_name::<A>(),
        };
        let declared = A::declared_types();

        for (index, tag) in declared.iter().enumerate() {
            if declared[..index].contains(tag) {
                return Err(Self::conflict(tag, owner, owner));
            }
            if let Some(existing) = self.owners.get(tag) {
                if existing.type_id != type_id {
                    return Err(Self::conflict(tag, *existing, owner));
                }
            }
        }

        for tag in declared {
            self.owners.insert(*tag, owner);
        }
        self.seen.insert(type_id);
        Ok(())
    }

    fn conflict(tag: &str, existing: ActionOwner, conflicting: ActionOwner) -> StoreError {
        tracing::warn!(
            action = tag,
            existing = existing.type_name,
            conflicting = conflicting.type_name,
            "Conflicting action type declaration"
        );
        StoreError::ConflictingActionType {
            action_type: tag.to_string(),
            existing: existing.type_name,
            conflicting: conflicting.type_name,
        }
    }
}
