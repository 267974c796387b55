use serde::{Deserialize, Serialize};

/// `{id, name}` reference the server embeds for projects, roles and groups.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IdName {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Project membership of a user, returned with `include=memberships`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: u32,
    pub project: IdName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<IdName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<IdName>,
    #[serde(default)]
    pub roles: Vec<IdName>,
}

impl Membership {
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }
}
