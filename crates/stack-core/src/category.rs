//! The closed set of configuration categories
//!
//! A category is one dimension of project configuration. The set is fixed at
//! compile time so an unknown category is unrepresentable rather than a
//! runtime string-match surprise. Option ids within a category live in the
//! registry; categories are the namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dimension of project configuration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Frontend,
    Backend,
    Runtime,
    Database,
    Orm,
    Api,
    Auth,
    DbSetup,
    WebDeploy,
    PackageManager,
    Addons,
    Examples,
}

impl Category {
    /// All categories in canonical (declaration) order
    pub const ALL: [Category; 12] = [
        Category::Frontend,
        Category::Backend,
        Category::Runtime,
        Category::Database,
        Category::Orm,
        Category::Api,
        Category::Auth,
        Category::DbSetup,
        Category::WebDeploy,
        Category::PackageManager,
        Category::Addons,
        Category::Examples,
    ];

    /// Field name used in the persisted descriptor
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend",
            Category::Runtime => "runtime",
            Category::Database => "database",
            Category::Orm => "orm",
            Category::Api => "api",
            Category::Auth => "auth",
            Category::DbSetup => "dbSetup",
            Category::WebDeploy => "webDeploy",
            Category::PackageManager => "packageManager",
            Category::Addons => "addons",
            Category::Examples => "examples",
        }
    }

    /// Short query-parameter key used by the web stack builder
    pub const fn url_key(&self) -> &'static str {
        match self {
            Category::Frontend => "fe",
            Category::Backend => "be",
            Category::Runtime => "rt",
            Category::Database => "db",
            Category::Orm => "orm",
            Category::Api => "api",
            Category::Auth => "au",
            Category::DbSetup => "dbs",
            Category::WebDeploy => "wd",
            Category::PackageManager => "pm",
            Category::Addons => "add",
            Category::Examples => "ex",
        }
    }

    /// Prompt label shown to the user
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Frontend => "frontend",
            Category::Backend => "backend framework",
            Category::Runtime => "runtime",
            Category::Database => "database",
            Category::Orm => "ORM",
            Category::Api => "API style",
            Category::Auth => "authentication",
            Category::DbSetup => "database setup",
            Category::WebDeploy => "web deployment",
            Category::PackageManager => "package manager",
            Category::Addons => "addons",
            Category::Examples => "examples",
        }
    }

    /// Whether the category holds a set of selections instead of exactly one
    pub const fn is_multi(&self) -> bool {
        matches!(
            self,
            Category::Frontend | Category::Addons | Category::Examples
        )
    }

    /// Reverse lookup for the web builder's query keys
    pub fn from_url_key(key: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.url_key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_keys_are_unique() {
        for (i, a) in Category::ALL.iter().enumerate() {
            for b in &Category::ALL[i + 1..] {
                assert_ne!(a.url_key(), b.url_key());
            }
        }
    }

    #[test]
    fn from_url_key_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::from_url_key(category.url_key()), Some(category));
        }
        assert_eq!(Category::from_url_key("zz"), None);
    }

    #[test]
    fn serde_names_match_descriptor_fields() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
