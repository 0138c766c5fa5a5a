//! Stack resolution: defaults, implications, validation
//!
//! Resolution is a pure function of `(seed, Registry, RuleSet)`. A seed moves
//! through four steps: validate ids, fill defaults and apply implications to
//! a fixed point, check the whole selection, freeze. A rejected resolution
//! leaves nothing behind; callers build a fresh seed and try again.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::{Result, StackError};
use crate::registry::Registry;
use crate::rules::{RuleSet, Selections, Violation};

/// Fallback project name when neither flags nor prompts supplied one
pub const DEFAULT_PROJECT_NAME: &str = "my-better-t-app";

/// Accept boolean spellings for auth coming from flags or older share URLs
fn canonical_id<'a>(category: Category, id: &'a str) -> &'a str {
    match (category, id) {
        (Category::Auth, "true") => "better-auth",
        (Category::Auth, "false") => "none",
        _ => id,
    }
}

/// A partial selection seeded from flags, prompts, or URL state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStack {
    selections: Selections,
    pub project_name: Option<String>,
    pub git: Option<bool>,
    pub install: Option<bool>,
}

impl PartialStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection for a category with a single option
    pub fn set(&mut self, category: Category, id: impl AsRef<str>) {
        let id = canonical_id(category, id.as_ref()).to_string();
        self.selections.insert(category, vec![id]);
    }

    /// Add one option to a multi-valued category's selection
    pub fn add(&mut self, category: Category, id: impl AsRef<str>) {
        let id = canonical_id(category, id.as_ref()).to_string();
        let ids = self.selections.entry(category).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Drop a category's selection (used by the interactive re-prompt loop)
    pub fn clear(&mut self, category: Category) {
        self.selections.remove(&category);
    }

    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.selections.get(&category).map(Vec::as_slice)
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// The fully resolved, validated stack. Immutable once produced; any change
/// means resolving a new seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackState {
    pub project_name: String,
    pub frontend: Vec<String>,
    pub backend: String,
    pub runtime: String,
    pub database: String,
    pub orm: String,
    pub api: String,
    pub auth: String,
    pub db_setup: String,
    pub web_deploy: String,
    pub package_manager: String,
    pub addons: Vec<String>,
    pub examples: Vec<String>,
    pub git: bool,
    pub install: bool,
}

impl StackState {
    /// The selected id(s) for a category
    pub fn selected(&self, category: Category) -> &[String] {
        match category {
            Category::Frontend => &self.frontend,
            Category::Backend => std::slice::from_ref(&self.backend),
            Category::Runtime => std::slice::from_ref(&self.runtime),
            Category::Database => std::slice::from_ref(&self.database),
            Category::Orm => std::slice::from_ref(&self.orm),
            Category::Api => std::slice::from_ref(&self.api),
            Category::Auth => std::slice::from_ref(&self.auth),
            Category::DbSetup => std::slice::from_ref(&self.db_setup),
            Category::WebDeploy => std::slice::from_ref(&self.web_deploy),
            Category::PackageManager => std::slice::from_ref(&self.package_manager),
            Category::Addons => &self.addons,
            Category::Examples => &self.examples,
        }
    }

    /// The selection as the map form the rule checker consumes
    pub fn selections(&self) -> Selections {
        Category::ALL
            .iter()
            .map(|category| (*category, self.selected(*category).to_vec()))
            .collect()
    }
}

/// Outcome of a resolution attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(StackState),
    Rejected(Vec<Violation>),
}

/// Resolves partial selections against a registry and rule set
pub struct Resolver<'a> {
    registry: &'a Registry,
    rules: &'a RuleSet,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a Registry, rules: &'a RuleSet) -> Self {
        Self { registry, rules }
    }

    /// Resolve a seed to a frozen stack or the full list of violations.
    ///
    /// `UnknownOption` and `CyclicImplication` abort the attempt; rule
    /// violations are collected, never short-circuited.
    pub fn resolve(&self, seed: &PartialStack) -> Result<Resolution> {
        for (category, ids) in seed.selections() {
            for id in ids {
                if !self.registry.is_valid(*category, id) {
                    return Err(StackError::UnknownOption {
                        category: *category,
                        id: id.clone(),
                    });
                }
            }
        }

        let full = self.resolve_implications(seed.selections())?;
        let violations = self.rules.check_stack(&full);
        if !violations.is_empty() {
            return Ok(Resolution::Rejected(violations));
        }
        Ok(Resolution::Resolved(self.freeze(seed, &full)))
    }

    /// Fill every unset category, applying `Requires` forcing and
    /// `DefaultsTo` overrides until nothing changes.
    ///
    /// User selections are never rewritten. Derived selections are recomputed
    /// each round (per category: forced, else override, else registry
    /// default), so a rule firing can re-default a category a previous round
    /// filled. A rule set whose implications chase each other never reaches a
    /// fixed point; the round bound turns that into `CyclicImplication`.
    pub fn resolve_implications(&self, explicit: &Selections) -> Result<Selections> {
        let mut derived: Selections = BTreeMap::new();
        let max_rounds = Category::ALL.len() + self.rules.rules().len() + 2;

        for _ in 0..max_rounds {
            let mut current = explicit.clone();
            for (category, ids) in &derived {
                current.entry(*category).or_insert_with(|| ids.clone());
            }

            let forced = self.rules.forced(&current);
            let overrides = self.rules.default_overrides(&current);

            let mut next: Selections = BTreeMap::new();
            for category in Category::ALL {
                if explicit.contains_key(&category) {
                    continue;
                }
                let id = forced
                    .get(&category)
                    .or_else(|| overrides.get(&category))
                    .copied()
                    .unwrap_or_else(|| self.registry.default_for(category).id);
                next.insert(category, vec![id.to_string()]);
            }

            if next == derived {
                let mut full = explicit.clone();
                full.extend(derived);
                return Ok(full);
            }

            derived = next;
        }

        // Find a category still in flux to name in the report
        let category = Category::ALL
            .iter()
            .copied()
            .find(|category| !explicit.contains_key(category))
            .unwrap_or(Category::Frontend);
        Err(StackError::CyclicImplication { category })
    }

    fn freeze(&self, seed: &PartialStack, full: &Selections) -> StackState {
        let single = |category: Category| full[&category][0].clone();
        let multi = |category: Category| full[&category].clone();
        StackState {
            project_name: seed
                .project_name
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            frontend: multi(Category::Frontend),
            backend: single(Category::Backend),
            runtime: single(Category::Runtime),
            database: single(Category::Database),
            orm: single(Category::Orm),
            api: single(Category::Api),
            auth: single(Category::Auth),
            db_setup: single(Category::DbSetup),
            web_deploy: single(Category::WebDeploy),
            package_manager: single(Category::PackageManager),
            addons: multi(Category::Addons),
            examples: multi(Category::Examples),
            git: seed.git.unwrap_or(true),
            install: seed.install.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category::*;
    use crate::rules::{at, Rule, RuleKind};

    fn fixtures() -> (Registry, RuleSet) {
        let registry = Registry::builtin().unwrap();
        let rules = RuleSet::builtin(&registry).unwrap();
        (registry, rules)
    }

    #[test]
    fn empty_seed_resolves_to_compatible_defaults() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        match resolver.resolve(&PartialStack::new()).unwrap() {
            Resolution::Resolved(state) => {
                assert_eq!(state.database, "sqlite");
                assert_eq!(state.orm, "drizzle");
                assert_eq!(state.project_name, DEFAULT_PROJECT_NAME);
                assert!(rules.check_stack(&state.selections()).is_empty());
            }
            Resolution::Rejected(violations) => {
                panic!("shipped defaults must be compatible, got {violations:?}")
            }
        }
    }

    #[test]
    fn unknown_option_is_fatal() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Database, "sqlite3");
        assert!(matches!(
            resolver.resolve(&seed),
            Err(StackError::UnknownOption { category: Database, .. })
        ));
    }

    #[test]
    fn orm_without_database_is_rejected_with_one_violation() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Database, "none");
        seed.set(Orm, "drizzle");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Rejected(violations) => {
                assert_eq!(violations.len(), 1, "got {violations:?}");
                assert_eq!(violations[0].second, (Database, "none".to_string()));
            }
            Resolution::Resolved(state) => panic!("expected rejection, got {state:?}"),
        }
    }

    #[test]
    fn auth_alone_pulls_in_the_default_database() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Auth, "true");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Resolved(state) => {
                assert_eq!(state.auth, "better-auth");
                assert_eq!(state.database, "sqlite");
            }
            Resolution::Rejected(violations) => panic!("expected resolve, got {violations:?}"),
        }
    }

    #[test]
    fn no_database_re_defaults_its_dependents() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Database, "none");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Resolved(state) => {
                assert_eq!(state.orm, "none");
                assert_eq!(state.auth, "none");
                assert_eq!(state.examples, vec!["none".to_string()]);
            }
            Resolution::Rejected(violations) => panic!("expected resolve, got {violations:?}"),
        }
    }

    #[test]
    fn workers_runtime_forces_and_re_defaults_the_stack() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Runtime, "workers");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Resolved(state) => {
                assert_eq!(state.backend, "hono");
                assert_eq!(state.database, "sqlite");
                assert_eq!(state.db_setup, "d1");
            }
            Resolution::Rejected(violations) => panic!("expected resolve, got {violations:?}"),
        }
    }

    #[test]
    fn mongo_re_defaults_the_orm_to_prisma() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Database, "mongodb");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Resolved(state) => assert_eq!(state.orm, "prisma"),
            Resolution::Rejected(violations) => panic!("expected resolve, got {violations:?}"),
        }
    }

    #[test]
    fn resolve_implications_is_idempotent() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Runtime, "workers");
        let once = resolver.resolve_implications(seed.selections()).unwrap();
        let twice = resolver.resolve_implications(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn chasing_implications_raise_cyclic_error() {
        let registry = Registry::builtin().unwrap();
        // bun re-defaults the package manager to pnpm, which re-defaults the
        // runtime to node, which kills the first rule's source - forever.
        let rules = RuleSet::new(
            vec![
                Rule {
                    kind: RuleKind::DefaultsTo,
                    when: at(Runtime, "bun"),
                    then: at(PackageManager, "pnpm"),
                    reason: "",
                },
                Rule {
                    kind: RuleKind::DefaultsTo,
                    when: at(PackageManager, "pnpm"),
                    then: at(Runtime, "node"),
                    reason: "",
                },
            ],
            &registry,
        )
        .unwrap();
        let resolver = Resolver::new(&registry, &rules);
        assert!(matches!(
            resolver.resolve(&PartialStack::new()),
            Err(StackError::CyclicImplication { .. })
        ));
    }

    #[test]
    fn rejection_reports_every_violation_at_once() {
        let (registry, rules) = fixtures();
        let resolver = Resolver::new(&registry, &rules);
        let mut seed = PartialStack::new();
        seed.set(Database, "none");
        seed.set(Orm, "drizzle");
        seed.set(Auth, "better-auth");
        match resolver.resolve(&seed).unwrap() {
            Resolution::Rejected(violations) => assert_eq!(violations.len(), 2, "got {violations:?}"),
            Resolution::Resolved(state) => panic!("expected rejection, got {state:?}"),
        }
    }
}
