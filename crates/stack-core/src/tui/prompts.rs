//! Interactive stack selection using cliclack

use anyhow::Result;

use crate::category::Category;
use crate::registry::Registry;
use crate::resolver::{PartialStack, Resolution, Resolver, StackState, DEFAULT_PROJECT_NAME};
use crate::rules::{RuleSet, Violation};

/// Run the interactive selection flow and return a resolved stack.
///
/// Flag-provided selections in the seed are kept and skipped when prompting.
/// When the resolver rejects a combination, only the offending categories are
/// asked again and resolution restarts from the corrected seed.
pub fn run(registry: &Registry, rules: &RuleSet, mut seed: PartialStack) -> Result<StackState> {
    cliclack::intro("Better-T-Stack")?;

    // Flag-provided ids are validated before any prompt is shown so a typo
    // fails fast instead of after a dozen answers
    for (category, ids) in seed.selections() {
        for id in ids {
            if !registry.is_valid(*category, id) {
                anyhow::bail!("unknown option '{}' for {}", id, category);
            }
        }
    }

    if seed.project_name.is_none() {
        let name: String = cliclack::input("Project name")
            .placeholder(DEFAULT_PROJECT_NAME)
            .default_input(DEFAULT_PROJECT_NAME)
            .interact()?;
        seed.project_name = Some(name);
    }

    let unset: Vec<Category> = Category::ALL
        .iter()
        .copied()
        .filter(|category| seed.get(*category).is_none())
        .collect();
    prompt_categories(registry, &mut seed, &unset)?;

    if seed.git.is_none() {
        seed.git = Some(
            cliclack::confirm("Initialize a git repository?")
                .initial_value(true)
                .interact()?,
        );
    }
    if seed.install.is_none() {
        seed.install = Some(
            cliclack::confirm("Install dependencies after creating?")
                .initial_value(true)
                .interact()?,
        );
    }

    let resolver = Resolver::new(registry, rules);
    let state = loop {
        match resolver.resolve(&seed)? {
            Resolution::Resolved(state) => break state,
            Resolution::Rejected(violations) => {
                for violation in &violations {
                    cliclack::log::error(violation.to_string())?;
                }
                let offending = offending_categories(&violations);
                cliclack::log::warning(format!(
                    "Let's fix {} selection(s)",
                    offending.len()
                ))?;
                for category in &offending {
                    seed.clear(*category);
                }
                prompt_categories(registry, &mut seed, &offending)?;
            }
        }
    };

    cliclack::log::success(format!(
        "Stack resolved: {} + {} on {}",
        state.frontend.join(", "),
        state.backend,
        state.runtime
    ))?;

    Ok(state)
}

fn prompt_categories(
    registry: &Registry,
    seed: &mut PartialStack,
    categories: &[Category],
) -> Result<()> {
    for category in categories {
        let options = registry.list_options(*category);
        let default = registry.default_for(*category);

        if category.is_multi() {
            let mut multi = cliclack::multiselect(format!("Select {}", category.label()));
            for def in options {
                multi = multi.item(def.id, def.label, def.hint);
            }
            let picked: Vec<&str> = multi
                .initial_values(vec![default.id])
                .required(true)
                .interact()?;
            for id in picked {
                seed.add(*category, id);
            }
        } else {
            let mut select = cliclack::select(format!("Select {}", category.label()));
            for def in options {
                select = select.item(def.id, def.label, def.hint);
            }
            let picked: &str = select.initial_value(default.id).interact()?;
            seed.set(*category, picked);
        }
    }
    Ok(())
}

/// Categories named by at least one violation, in first-seen order
fn offending_categories(violations: &[Violation]) -> Vec<Category> {
    let mut categories = Vec::new();
    for violation in violations {
        for category in [violation.first.0, violation.second.0] {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    categories
}
