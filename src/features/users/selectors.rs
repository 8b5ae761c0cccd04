use crate::store::{create_feature_selector, create_selector, Selector};

use super::state::{User, UserState};
use super::FEATURE;

/// Read-views over the users slice.
#[derive(Clone)]
pub struct UserSelectors {
    pub feature: Selector<UserState>,
    pub mask_user_name: Selector<bool>,
    pub current_user: Selector<Option<User>>,
}

impl UserSelectors {
    pub fn new() -> Self {
        let feature = create_feature_selector::<UserState>(FEATURE);
        let mask_user_name = create_selector(&feature, |state: &UserState| state.mask_user_name);
        let current_user = create_selector(&feature, |state: &UserState| state.current_user.clone());
        Self {
            feature,
            mask_user_name,
            current_user,
        }
    }
}

impl Default for UserSelectors {
    fn default() -> Self {
        Self::new()
    }
}
