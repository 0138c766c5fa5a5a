//! Project writing - persists the resolved stack into the target directory
//!
//! Only runs after a resolution reached `Resolved`; a rejected resolution
//! never gets here, so no partial project is ever written.

use anyhow::{Context, Result};
use colored::Colorize;
use stack_core::{Category, ProjectDescriptor, StackState, DESCRIPTOR_FILE};
use std::path::Path;

/// Create the project directory and write the descriptor plus a README stub
pub fn write_project(state: &StackState, target_dir: &Path, tool_version: &str) -> Result<()> {
    if target_dir.join(DESCRIPTOR_FILE).exists() {
        anyhow::bail!(
            "{} already contains {}",
            target_dir.display(),
            DESCRIPTOR_FILE
        );
    }

    std::fs::create_dir_all(target_dir)
        .with_context(|| format!("Failed to create {}", target_dir.display()))?;

    let descriptor = ProjectDescriptor::build(state.clone(), tool_version);
    let descriptor_path = target_dir.join(DESCRIPTOR_FILE);
    std::fs::write(&descriptor_path, format!("{}\n", descriptor.to_json()?))
        .with_context(|| format!("Failed to write {}", descriptor_path.display()))?;

    let readme_path = target_dir.join("README.md");
    std::fs::write(&readme_path, render_readme(state))
        .with_context(|| format!("Failed to write {}", readme_path.display()))?;

    println!(
        "{} {} ({} + {})",
        "Created".green().bold(),
        target_dir.display(),
        state.frontend.join(", "),
        state.backend
    );
    Ok(())
}

fn render_readme(state: &StackState) -> String {
    let mut lines = vec![
        format!("# {}", state.project_name),
        String::new(),
        "Scaffolded with Better-T-Stack.".to_string(),
        String::new(),
        "## Stack".to_string(),
        String::new(),
    ];
    for category in Category::ALL {
        lines.push(format!(
            "- {}: {}",
            category.label(),
            state.selected(category).join(", ")
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Print what to do next, numbered the way the prompts end
pub fn print_next_steps(state: &StackState, dir: &Path) {
    let mut steps = Vec::new();

    let current = std::env::current_dir().ok();
    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }
    steps.push(format!("{} install", state.package_manager));
    if state.git {
        steps.push("git init".to_string());
    }
    steps.push(format!("{} run dev", state.package_manager));

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
    println!("  {}", "Happy coding!".cyan());
    println!();
}
