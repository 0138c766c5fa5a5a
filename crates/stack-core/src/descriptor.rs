//! The persisted project descriptor
//!
//! Written into the root of every generated project so later tooling can
//! read back exactly which stack the project was created with. Reading an
//! older descriptor warns but never fails; the recorded stack is re-checked
//! against the current rule set instead.

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::StackState;

/// File name of the descriptor in a generated project root
pub const DESCRIPTOR_FILE: &str = "tstack.json";

/// Bumped when the descriptor shape itself changes
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub schema_version: u32,
    pub tool_version: String,
    pub created_at: DateTime<Utc>,
    pub stack: StackState,
}

impl ProjectDescriptor {
    /// Build a descriptor for a resolved stack. Pure; writing the file is
    /// the caller's job.
    pub fn build(stack: StackState, tool_version: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tool_version: tool_version.to_string(),
            created_at: Utc::now(),
            stack,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compare the recorded tool version against the running one.
    /// Returns a warning message when they diverge; a mismatch never blocks
    /// reading the descriptor.
    pub fn version_warning(&self, current_tool_version: &str) -> Option<String> {
        let written = Version::parse(&self.tool_version).ok()?;
        let current = Version::parse(current_tool_version).ok()?;

        if written < current {
            Some(format!(
                "This project was generated by tstack {} and you are running {}.\n\
                 Newer options may not validate against the recorded stack.",
                written, current
            ))
        } else if written > current {
            Some(format!(
                "This project was generated by a newer tstack ({}).\n\
                 Consider updating: cargo install tstack-tools --force",
                written
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::resolver::{PartialStack, Resolution, Resolver};
    use crate::rules::RuleSet;

    fn resolved_defaults() -> StackState {
        let registry = Registry::builtin().unwrap();
        let rules = RuleSet::builtin(&registry).unwrap();
        match Resolver::new(&registry, &rules)
            .resolve(&PartialStack::new())
            .unwrap()
        {
            Resolution::Resolved(state) => state,
            Resolution::Rejected(violations) => panic!("defaults rejected: {violations:?}"),
        }
    }

    #[test]
    fn json_round_trip_preserves_the_stack() {
        let descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        let parsed = ProjectDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(parsed, descriptor);
    }

    #[test]
    fn parsed_stack_still_validates() {
        let registry = Registry::builtin().unwrap();
        let rules = RuleSet::builtin(&registry).unwrap();
        let descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        let parsed = ProjectDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
        assert!(rules.check_stack(&parsed.stack.selections()).is_empty());
    }

    #[test]
    fn descriptor_fields_are_camel_case() {
        let descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        let json = descriptor.to_json().unwrap();
        assert!(json.contains("\"schemaVersion\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"packageManager\""));
        assert!(json.contains("\"dbSetup\""));
    }

    #[test]
    fn older_descriptor_warns() {
        let mut descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        descriptor.tool_version = "0.0.1".to_string();
        let warning = descriptor.version_warning("0.1.0");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.0.1"));
    }

    #[test]
    fn newer_descriptor_suggests_updating() {
        let mut descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        descriptor.tool_version = "0.2.0".to_string();
        let warning = descriptor.version_warning("0.1.0");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("cargo install"));
    }

    #[test]
    fn matching_version_is_silent() {
        let descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        assert!(descriptor.version_warning("0.1.0").is_none());
    }

    #[test]
    fn unparseable_version_skips_the_warning() {
        let mut descriptor = ProjectDescriptor::build(resolved_defaults(), "0.1.0");
        descriptor.tool_version = "not-a-version".to_string();
        assert!(descriptor.version_warning("0.1.0").is_none());
    }
}
