mod custom_field;
mod membership;
mod status;
mod user;

pub use custom_field::CustomField;
pub use membership::{IdName, Membership};
pub use status::{StatusField, StatusUpdate, UserStatus};
pub use user::User;
