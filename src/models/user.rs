use serde::{Deserialize, Serialize};

/// Id of the user every favorites endpoint acts on. There is no session or
/// authentication layer, so the "current user" is fixed.
pub const CURRENT_USER_ID: i32 = 1;

/// A registered user. Owns zero or more favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
}

impl User {
    pub fn new(id: i32, email: impl Into<String>) -> Self {
        User {
            id,
            email: email.into(),
            is_active: true,
        }
    }
}
