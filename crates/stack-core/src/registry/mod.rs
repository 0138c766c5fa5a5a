//! Option registry - the catalog of selectable values per category
//!
//! The registry is loaded once at startup and passed around as an explicit
//! read-only value. Catalog defects (duplicate ids, more than one default)
//! fail at load, not when a lookup happens mid-resolution.

mod catalog;

use std::collections::BTreeMap;

use crate::category::Category;
use crate::error::{Result, StackError};

/// A single selectable value within a category
///
/// The id is unique within its category; ids in different categories may
/// collide ("none" appears in most of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDef {
    /// Stable identifier used in flags, URLs, and the descriptor
    pub id: &'static str,

    /// Human-readable display name
    pub label: &'static str,

    /// One-line description shown next to the option in prompts
    pub hint: &'static str,

    /// Whether this option is the category's default
    pub default: bool,

    /// Sort key for display order; declaration order breaks ties
    pub sort_order: u8,

    /// Exclusivity group within a multi-valued category (e.g. web frontends)
    pub group: Option<&'static str>,
}

/// Read-only catalog of every category's options
#[derive(Debug, Clone)]
pub struct Registry {
    options: BTreeMap<Category, Vec<OptionDef>>,
}

impl Registry {
    /// Load the shipped catalog, validating it on the way in
    pub fn builtin() -> Result<Self> {
        let mut options = BTreeMap::new();
        for category in Category::ALL {
            let mut defs = catalog::options_for(category).to_vec();
            // Stable sort keeps declaration order for equal sort keys
            defs.sort_by_key(|def| def.sort_order);
            options.insert(category, defs);
        }
        let registry = Self { options };
        registry.validate()?;
        Ok(registry)
    }

    fn validate(&self) -> Result<()> {
        for (category, defs) in &self.options {
            if defs.is_empty() {
                return Err(StackError::InvalidCatalog(format!(
                    "{category} has no options"
                )));
            }
            for (i, def) in defs.iter().enumerate() {
                if defs[..i].iter().any(|other| other.id == def.id) {
                    return Err(StackError::InvalidCatalog(format!(
                        "duplicate option '{}' in {category}",
                        def.id
                    )));
                }
            }
            let defaults = defs.iter().filter(|def| def.default).count();
            if defaults > 1 {
                return Err(StackError::InvalidCatalog(format!(
                    "{category} flags {defaults} defaults; at most one is allowed"
                )));
            }
        }
        Ok(())
    }

    /// Options of a category in display order
    pub fn list_options(&self, category: Category) -> &[OptionDef] {
        &self.options[&category]
    }

    /// Case-sensitive lookup of a single option
    pub fn get_option(&self, category: Category, id: &str) -> Option<&OptionDef> {
        self.options[&category].iter().find(|def| def.id == id)
    }

    /// The category's default: the flagged option, or the first in list order
    pub fn default_for(&self, category: Category) -> &OptionDef {
        let defs = &self.options[&category];
        defs.iter().find(|def| def.default).unwrap_or(&defs[0])
    }

    pub fn is_valid(&self, category: Category, id: &str) -> bool {
        self.get_option(category, id).is_some()
    }
}
