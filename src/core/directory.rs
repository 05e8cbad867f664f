//! # User Directory
//!
//! The table of users that can be mentioned. Fixed for the lifetime of the
//! process: it's built once from config (or the built-in table) and only
//! read afterwards.

use serde::{Deserialize, Serialize};

/// A mentionable user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: u32,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl User {
    pub fn new(id: u32, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Ordered id → display name table. Directory order is insertion order
/// and is the order candidates are offered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    users: Vec<User>,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(vec![
            User::new(1, "Kevin"),
            User::new(2, "Jeff"),
            User::new(3, "Bryan"),
            User::new(4, "Gabbey"),
            User::new(5, "John"),
            User::new(6, "Jerry"),
        ])
    }
}

impl Directory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Names starting with `fragment`, compared case-insensitively,
    /// in directory order. An empty fragment matches everyone.
    pub fn filter_prefix(&self, fragment: &str) -> Vec<String> {
        let needle = fragment.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.display_name.to_lowercase().starts_with(&needle))
            .map(|u| u.display_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directory_order() {
        let dir = Directory::default();
        let names: Vec<&str> = dir.users().iter().map(|u| u.display_name.as_str()).collect();
        assert_eq!(names, ["Kevin", "Jeff", "Bryan", "Gabbey", "John", "Jerry"]);
    }

    #[test]
    fn test_filter_prefix_case_insensitive() {
        let dir = Directory::default();
        assert_eq!(dir.filter_prefix("je"), vec!["Jeff", "Jerry"]);
        assert_eq!(dir.filter_prefix("JE"), vec!["Jeff", "Jerry"]);
        assert_eq!(dir.filter_prefix("j"), vec!["Jeff", "John", "Jerry"]);
    }

    #[test]
    fn test_filter_empty_fragment_matches_all() {
        let dir = Directory::default();
        assert_eq!(dir.filter_prefix("").len(), 6);
    }

    #[test]
    fn test_filter_no_match() {
        let dir = Directory::default();
        assert!(dir.filter_prefix("zed").is_empty());
    }
}
