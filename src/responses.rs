//! JSON envelopes wrapping the users resource payloads.

use serde::Deserialize;

use crate::types::User;

/// One page of `/users.json`, with the server's pagination echo.
#[derive(Deserialize, Debug, Clone)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub total_count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Deserialize)]
pub(crate) struct UsersEnvelope {
    pub users: Vec<User>,
}

#[derive(Deserialize)]
pub(crate) struct UserEnvelope {
    pub user: User,
}

#[derive(Deserialize)]
pub(crate) struct TotalCountEnvelope {
    pub total_count: u32,
}

#[derive(Deserialize)]
pub(crate) struct ErrorsEnvelope {
    pub errors: Vec<String>,
}
