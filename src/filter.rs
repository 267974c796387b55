//! Query-string filters for the users resource.

use std::collections::BTreeMap;

use clap::ValueEnum;

use crate::client::Pagination;

/// Accumulated query parameters. Keys are unique; a later write for the same
/// key replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pairs: BTreeMap<String, String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pair(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Value of the `status` filter on `/users.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum UserStatusFilter {
    /// Every account regardless of status
    All,
    /// Active accounts only (the server default)
    #[default]
    Active,
    /// Registered, not yet activated
    Registered,
    /// Locked accounts
    Locked,
}

impl UserStatusFilter {
    pub fn as_query_value(self) -> &'static str {
        match self {
            UserStatusFilter::All => "",
            UserStatusFilter::Active => "1",
            UserStatusFilter::Registered => "2",
            UserStatusFilter::Locked => "3",
        }
    }
}

/// Filter for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersFilter {
    filter: Filter,
}

impl UsersFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: UserStatusFilter) -> Self {
        self.filter.add_pair("status", status.as_query_value());
        self
    }

    /// Substring match on login, first name, last name and mail.
    pub fn name(mut self, name: &str) -> Self {
        self.filter.add_pair("name", name);
        self
    }

    pub fn group_id(mut self, group_id: u32) -> Self {
        self.filter.add_pair("group_id", group_id.to_string());
        self
    }

    /// Restrict the result to one page. Zero values leave the server default.
    pub fn page(mut self, page: Pagination) -> Self {
        for (key, value) in page.query_pairs() {
            self.filter.add_pair(key, value);
        }
        self
    }

    pub fn as_filter(&self) -> &Filter {
        &self.filter
    }
}

/// Related data that can be embedded in a single-user response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserInclude {
    Memberships,
    Groups,
}

impl UserInclude {
    pub fn as_str(self) -> &'static str {
        match self {
            UserInclude::Memberships => "memberships",
            UserInclude::Groups => "groups",
        }
    }
}

/// Filter for fetching one user by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserByIdFilter {
    filter: Filter,
}

impl UserByIdFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `include` parameter, comma-joining the given flags. Calling it
    /// again replaces the previous set.
    pub fn include(mut self, includes: &[UserInclude]) -> Self {
        let mut names: Vec<&str> = Vec::with_capacity(includes.len());
        for include in includes {
            if !names.contains(&include.as_str()) {
                names.push(include.as_str());
            }
        }
        self.filter.add_pair("include", names.join(","));
        self
    }

    pub fn as_filter(&self) -> &Filter {
        &self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_write_overwrites() {
        let mut filter = Filter::new();
        filter.add_pair("name", "alice");
        filter.add_pair("name", "bob");
        assert_eq!(filter.get("name"), Some("bob"));
        assert_eq!(filter.pairs().count(), 1);
    }

    #[test]
    fn test_users_filter_pairs() {
        let filter = UsersFilter::new()
            .status(UserStatusFilter::Locked)
            .name("smith")
            .group_id(7);
        let f = filter.as_filter();
        assert_eq!(f.get("status"), Some("3"));
        assert_eq!(f.get("name"), Some("smith"));
        assert_eq!(f.get("group_id"), Some("7"));
    }

    #[test]
    fn test_status_all_is_empty_value() {
        let filter = UsersFilter::new().status(UserStatusFilter::All);
        assert_eq!(filter.as_filter().get("status"), Some(""));
    }

    #[test]
    fn test_page_skips_zero_values() {
        let filter = UsersFilter::new().page(Pagination::new(0, 25));
        assert_eq!(filter.as_filter().get("limit"), Some("25"));
        assert_eq!(filter.as_filter().get("offset"), None);
    }

    #[test]
    fn test_include_is_comma_joined() {
        let filter = UserByIdFilter::new().include(&[
            UserInclude::Memberships,
            UserInclude::Groups,
            UserInclude::Memberships,
        ]);
        assert_eq!(filter.as_filter().get("include"), Some("memberships,groups"));
    }

    #[test]
    fn test_include_replaces_previous() {
        let filter = UserByIdFilter::new()
            .include(&[UserInclude::Memberships])
            .include(&[UserInclude::Groups]);
        assert_eq!(filter.as_filter().get("include"), Some("groups"));
    }
}
