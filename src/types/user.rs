use serde::{Deserialize, Serialize};

use super::{CustomField, IdName, Membership, UserStatus};

/// A Redmine user account as returned by `/users.json` and `/users/<id>.json`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    /// Hidden by the server unless the caller may see it.
    pub mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// Raw account status code; see [`User::account_status`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    pub created_on: Option<String>,
    /// Absent for accounts that never logged in.
    pub last_login_on: Option<String>,
    #[serde(default)]
    pub memberships: Vec<Membership>,
    /// Only present with `include=groups`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<IdName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
}

impl User {
    pub fn account_status(&self) -> Option<UserStatus> {
        self.status.and_then(UserStatus::from_i32)
    }

    pub fn full_name(&self) -> String {
        match (self.firstname.is_empty(), self.lastname.is_empty()) {
            (false, false) => format!("{} {}", self.firstname, self.lastname),
            (false, true) => self.firstname.clone(),
            (true, false) => self.lastname.clone(),
            (true, true) => self.login.clone(),
        }
    }
}
