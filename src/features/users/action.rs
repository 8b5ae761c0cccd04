use crate::features::users::state::User;

crate::actions! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum UserAction {
        ToggleMaskUserName = "[Users] Toggle Mask Username",
        SetCurrentUser { user: User } = "[Users] Set Current User",
        ClearCurrentUser = "[Users] Clear Current User",
    }
}
