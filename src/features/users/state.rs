use serde::{Deserialize, Serialize};

use crate::store::SliceState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub user_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    /// Whether the login form hides the user name as it is typed.
    pub mask_user_name: bool,
    pub current_user: Option<User>,
}

impl SliceState for UserState {}
