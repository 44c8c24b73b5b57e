use serde::{Deserialize, Serialize};

pub type UserId = u32;

/// The signed-in user, as produced by the authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
}
