//! Client binding for the Redmine REST API users resource.
//!
//! ```no_run
//! # async fn demo() -> redmine_cli::Result<()> {
//! use redmine_cli::{RedmineClient, UserStatusFilter, UsersFilter};
//!
//! let client = RedmineClient::new("https://redmine.example.com", "api-key")?;
//! let everyone = client.list_all_users().await?;
//! let locked = client
//!     .list_users_filtered(&UsersFilter::new().status(UserStatusFilter::Locked))
//!     .await?;
//! println!("{} users, {} locked", everyone.len(), locked.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
mod responses;
pub mod types;

pub use client::{AuthMode, Pagination, RedmineClient, PAGE_SIZE};
pub use config::Config;
pub use error::{RedmineError, Result};
pub use filter::{Filter, UserByIdFilter, UserInclude, UserStatusFilter, UsersFilter};
pub use responses::UsersPage;
pub use types::{CustomField, IdName, Membership, StatusUpdate, User, UserStatus};
