//! Compatibility rules between options
//!
//! Constraints are data, not branches: each rule relates exactly two
//! `(category, option)` endpoints, and `check_stack` walks the rule table
//! against the selection. Pairwise rules keep the table linear in the number
//! of constraints; ternary constraints are deliberately inexpressible.

mod table;

use std::collections::BTreeMap;
use std::fmt;

use crate::category::Category;
use crate::error::{Result, StackError};
use crate::registry::Registry;

/// One endpoint of a rule: a concrete option within a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub category: Category,
    pub id: &'static str,
}

pub(crate) const fn at(category: Category, id: &'static str) -> Endpoint {
    Endpoint { category, id }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Selecting `when` forbids selecting `then`; symmetric regardless of
    /// which side is declared first
    Excludes,

    /// Selecting `when` forces `then`: resolution fills it into an unset
    /// category, validation rejects a category set to anything else
    Requires,

    /// Selecting `when` changes which option is the default for `then`'s
    /// category; consulted during resolution only, never a violation
    DefaultsTo,
}

/// A single declarative compatibility rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub when: Endpoint,
    pub then: Endpoint,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Excludes,
    Requires,
}

/// A single compatibility failure reported by `check_stack`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    /// The selection that triggered the rule
    pub first: (Category, String),
    /// The conflicting selection (for `Requires`, what the category actually holds)
    pub second: (Category, String),
    /// For `Requires`: the option id `first` needs in `second`'s category
    pub required: Option<String>,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Excludes => write!(
                f,
                "{} '{}' cannot be combined with {} '{}': {}",
                self.first.0, self.first.1, self.second.0, self.second.1, self.reason
            ),
            ViolationKind::Requires => write!(
                f,
                "{} '{}' requires {} '{}' (found '{}'): {}",
                self.first.0,
                self.first.1,
                self.second.0,
                self.required.as_deref().unwrap_or("?"),
                self.second.1,
                self.reason
            ),
        }
    }
}

/// The working selection: every selected option id per category
pub type Selections = BTreeMap<Category, Vec<String>>;

fn selected(selections: &Selections, endpoint: Endpoint) -> bool {
    selections
        .get(&endpoint.category)
        .is_some_and(|ids| ids.iter().any(|id| id == endpoint.id))
}

/// Read-only set of compatibility rules, validated at load
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from explicit rules, validating endpoints and
    /// pair consistency against the registry
    pub fn new(rules: Vec<Rule>, registry: &Registry) -> Result<Self> {
        let set = Self { rules };
        set.validate(registry)?;
        Ok(set)
    }

    /// The shipped matrix: the declared table plus two generated families -
    /// mutual exclusion inside each frontend group, and `none` versus any
    /// sibling within a multi-valued category
    pub fn builtin(registry: &Registry) -> Result<Self> {
        let mut rules = table::RULES.to_vec();

        for category in Category::ALL.iter().copied().filter(Category::is_multi) {
            let options = registry.list_options(category);

            let mut groups: Vec<&'static str> = Vec::new();
            for group in options.iter().filter_map(|def| def.group) {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
            for group in groups {
                let members: Vec<&'static str> = options
                    .iter()
                    .filter(|def| def.group == Some(group))
                    .map(|def| def.id)
                    .collect();
                for (i, a) in members.iter().enumerate() {
                    for b in &members[i + 1..] {
                        rules.push(Rule {
                            kind: RuleKind::Excludes,
                            when: at(category, *a),
                            then: at(category, *b),
                            reason: "pick one per group",
                        });
                    }
                }
            }

            for def in options.iter().filter(|def| def.id != "none") {
                rules.push(Rule {
                    kind: RuleKind::Excludes,
                    when: at(category, "none"),
                    then: at(category, def.id),
                    reason: "'none' cannot be combined with other selections",
                });
            }
        }

        Self::new(rules, registry)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn validate(&self, registry: &Registry) -> Result<()> {
        for rule in &self.rules {
            for endpoint in [rule.when, rule.then] {
                if !registry.is_valid(endpoint.category, endpoint.id) {
                    return Err(StackError::InvalidRuleSet(format!(
                        "rule references unknown option '{}' in {}",
                        endpoint.id, endpoint.category
                    )));
                }
            }
        }

        // The same unordered pair may not carry contradictory kinds, and
        // excludes pairs are symmetric-closed, so a second declaration of the
        // same pair (either direction) is a defect.
        for (i, rule) in self.rules.iter().enumerate() {
            for other in &self.rules[i + 1..] {
                let same = rule.when == other.when && rule.then == other.then;
                let flipped = rule.when == other.then && rule.then == other.when;
                if !(same || flipped) {
                    continue;
                }
                let pair_conflict = matches!(
                    (rule.kind, other.kind),
                    (RuleKind::Excludes, RuleKind::Excludes)
                        | (RuleKind::Excludes, RuleKind::Requires)
                        | (RuleKind::Requires, RuleKind::Excludes)
                );
                if pair_conflict {
                    return Err(StackError::InvalidRuleSet(format!(
                        "conflicting or duplicate rules over {} '{}' and {} '{}'",
                        rule.when.category, rule.when.id, rule.then.category, rule.then.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Check a single pair of selections against the table
    pub fn check_pair(
        &self,
        a_category: Category,
        a_id: &str,
        b_category: Category,
        b_id: &str,
    ) -> Option<Violation> {
        let matches = |endpoint: Endpoint, category: Category, id: &str| {
            endpoint.category == category && endpoint.id == id
        };
        for rule in &self.rules {
            match rule.kind {
                RuleKind::Excludes => {
                    let forward = matches(rule.when, a_category, a_id)
                        && matches(rule.then, b_category, b_id);
                    let backward = matches(rule.when, b_category, b_id)
                        && matches(rule.then, a_category, a_id);
                    if forward || backward {
                        return Some(Violation {
                            kind: ViolationKind::Excludes,
                            first: (a_category, a_id.to_string()),
                            second: (b_category, b_id.to_string()),
                            required: None,
                            reason: rule.reason.to_string(),
                        });
                    }
                }
                RuleKind::Requires => {
                    if matches(rule.when, a_category, a_id)
                        && rule.then.category == b_category
                        && rule.then.id != b_id
                    {
                        return Some(Violation {
                            kind: ViolationKind::Requires,
                            first: (a_category, a_id.to_string()),
                            second: (b_category, b_id.to_string()),
                            required: Some(rule.then.id.to_string()),
                            reason: rule.reason.to_string(),
                        });
                    }
                    if matches(rule.when, b_category, b_id)
                        && rule.then.category == a_category
                        && rule.then.id != a_id
                    {
                        return Some(Violation {
                            kind: ViolationKind::Requires,
                            first: (b_category, b_id.to_string()),
                            second: (a_category, a_id.to_string()),
                            required: Some(rule.then.id.to_string()),
                            reason: rule.reason.to_string(),
                        });
                    }
                }
                RuleKind::DefaultsTo => {}
            }
        }
        None
    }

    /// Evaluate the whole rule table against a fully-populated selection.
    ///
    /// Every rule is checked against every selected id (multi-valued
    /// categories contribute each member, so same-category pairs fire too).
    /// All violations are collected in rule-declaration order; nothing
    /// short-circuits.
    pub fn check_stack(&self, selections: &Selections) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            match rule.kind {
                RuleKind::Excludes => {
                    if selected(selections, rule.when) && selected(selections, rule.then) {
                        violations.push(Violation {
                            kind: ViolationKind::Excludes,
                            first: (rule.when.category, rule.when.id.to_string()),
                            second: (rule.then.category, rule.then.id.to_string()),
                            required: None,
                            reason: rule.reason.to_string(),
                        });
                    }
                }
                RuleKind::Requires => {
                    if selected(selections, rule.when) && !selected(selections, rule.then) {
                        let actual = selections
                            .get(&rule.then.category)
                            .map(|ids| ids.join(","))
                            .unwrap_or_default();
                        violations.push(Violation {
                            kind: ViolationKind::Requires,
                            first: (rule.when.category, rule.when.id.to_string()),
                            second: (rule.then.category, actual),
                            required: Some(rule.then.id.to_string()),
                            reason: rule.reason.to_string(),
                        });
                    }
                }
                RuleKind::DefaultsTo => {}
            }
        }
        violations
    }

    /// Default overrides implied by the current selection: for each
    /// `DefaultsTo` rule whose source is selected, the target category's
    /// default changes. Earlier declarations win on conflict.
    pub(crate) fn default_overrides(
        &self,
        selections: &Selections,
    ) -> BTreeMap<Category, &'static str> {
        let mut overrides = BTreeMap::new();
        for rule in &self.rules {
            if rule.kind == RuleKind::DefaultsTo && selected(selections, rule.when) {
                overrides.entry(rule.then.category).or_insert(rule.then.id);
            }
        }
        overrides
    }

    /// Forced selections implied by `Requires` rules whose source is
    /// selected. Earlier declarations win on conflict.
    pub(crate) fn forced(&self, selections: &Selections) -> BTreeMap<Category, &'static str> {
        let mut forced = BTreeMap::new();
        for rule in &self.rules {
            if rule.kind == RuleKind::Requires && selected(selections, rule.when) {
                forced.entry(rule.then.category).or_insert(rule.then.id);
            }
        }
        forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category::*;

    fn fixtures() -> (Registry, RuleSet) {
        let registry = Registry::builtin().unwrap();
        let rules = RuleSet::builtin(&registry).unwrap();
        (registry, rules)
    }

    #[test]
    fn builtin_rules_validate_against_builtin_catalog() {
        fixtures();
    }

    #[test]
    fn excludes_is_symmetric() {
        let (_, rules) = fixtures();
        // Declared as drizzle -> mongodb only; both orientations must report
        assert!(rules.check_pair(Orm, "drizzle", Database, "mongodb").is_some());
        assert!(rules.check_pair(Database, "mongodb", Orm, "drizzle").is_some());
    }

    #[test]
    fn compatible_pair_is_ok() {
        let (_, rules) = fixtures();
        assert!(rules.check_pair(Orm, "drizzle", Database, "sqlite").is_none());
    }

    #[test]
    fn requires_reports_the_missing_option() {
        let (_, rules) = fixtures();
        let violation = rules
            .check_pair(DbSetup, "turso", Database, "postgres")
            .unwrap();
        assert_eq!(violation.kind, ViolationKind::Requires);
        assert_eq!(violation.required.as_deref(), Some("sqlite"));
    }

    #[test]
    fn check_stack_collects_every_violation() {
        let (registry, rules) = fixtures();
        let mut selections = Selections::new();
        for category in Category::ALL {
            selections.insert(category, vec![registry.default_for(category).id.to_string()]);
        }
        selections.insert(Database, vec!["none".to_string()]);
        // Defaults include drizzle, better-auth, and the todo example - all
        // three clash with database 'none' and all three must be reported.
        let violations = rules.check_stack(&selections);
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn web_frontends_are_mutually_exclusive() {
        let (_, rules) = fixtures();
        assert!(rules
            .check_pair(Frontend, "next", Frontend, "nuxt")
            .is_some());
        // A web frontend can still pair with a native one
        assert!(rules
            .check_pair(Frontend, "next", Frontend, "native-nativewind")
            .is_none());
    }

    #[test]
    fn none_excludes_siblings_in_multi_categories() {
        let (_, rules) = fixtures();
        assert!(rules.check_pair(Addons, "none", Addons, "biome").is_some());
        assert!(rules.check_pair(Examples, "todo", Examples, "none").is_some());
    }

    #[test]
    fn duplicate_excludes_pair_is_rejected_at_load() {
        let registry = Registry::builtin().unwrap();
        let rules = vec![
            Rule {
                kind: RuleKind::Excludes,
                when: at(Orm, "drizzle"),
                then: at(Database, "mongodb"),
                reason: "",
            },
            Rule {
                kind: RuleKind::Excludes,
                when: at(Database, "mongodb"),
                then: at(Orm, "drizzle"),
                reason: "",
            },
        ];
        assert!(matches!(
            RuleSet::new(rules, &registry),
            Err(crate::error::StackError::InvalidRuleSet(_))
        ));
    }

    #[test]
    fn rule_naming_unknown_option_is_rejected_at_load() {
        let registry = Registry::builtin().unwrap();
        let rules = vec![Rule {
            kind: RuleKind::Excludes,
            when: at(Orm, "drizzle"),
            then: at(Database, "oracle"),
            reason: "",
        }];
        assert!(matches!(
            RuleSet::new(rules, &registry),
            Err(crate::error::StackError::InvalidRuleSet(_))
        ));
    }
}
