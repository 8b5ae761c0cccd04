use crate::store::Reducer;

use super::action::UserAction;
use super::state::UserState;

pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    type Action = UserAction;

    fn reduce(&self, state: &Self::State, action: &Self::Action) -> Option<Self::State> {
        match action {
            UserAction::ToggleMaskUserName => Some(UserState {
                mask_user_name: !state.mask_user_name,
                ..state.clone()
            }),
            UserAction::SetCurrentUser { user } => Some(UserState {
                current_user: Some(user.clone()),
                ..state.clone()
            }),
            UserAction::ClearCurrentUser => state.current_user.as_ref().map(|_| UserState {
                current_user: None,
                ..state.clone()
            }),
        }
    }
}
