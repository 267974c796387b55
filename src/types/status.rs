use std::fmt;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Account status of a Redmine user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserStatus {
    /// Can log in (1)
    Active = 1,
    /// Registered but not yet activated (2)
    Registered = 2,
    /// Locked out (3)
    Locked = 3,
}

impl UserStatus {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(UserStatus::Active),
            2 => Some(UserStatus::Registered),
            3 => Some(UserStatus::Locked),
            _ => None,
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Registered => "Registered",
            UserStatus::Locked => "Locked",
        }
    }

    /// Get the colored label for terminal output.
    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            UserStatus::Active => label.green().to_string(),
            UserStatus::Registered => label.yellow().to_string(),
            UserStatus::Locked => label.red().bold().to_string(),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for UserStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        UserStatus::from_i32(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown user status {value}")))
    }
}

/// Request body for `PUT /users/<id>.json`: `{"user": {"status": <int>}}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub user: StatusField,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusField {
    pub status: i32,
}

impl StatusUpdate {
    pub fn new(status: i32) -> Self {
        Self {
            user: StatusField { status },
        }
    }

    pub fn status(&self) -> i32 {
        self.user.status
    }
}

impl From<UserStatus> for StatusUpdate {
    fn from(status: UserStatus) -> Self {
        Self::new(status.as_i32())
    }
}
