//! tstack - CLI for scaffolding Better-T-Stack projects

mod writer;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use stack_core::{
    schema, urlstate, Category, PartialStack, ProjectDescriptor, Registry, Resolution, Resolver,
    RuleSet, Violation, DESCRIPTOR_FILE, SCHEMA_VERSION,
};
use std::path::PathBuf;

/// CLI version - stamped into every generated descriptor
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "tstack")]
#[command(about = "CLI for scaffolding Better-T-Stack projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CreateArgs),
    /// Re-validate an existing project's descriptor against the current rules
    Check(CheckArgs),
    /// Print the JSON-Schema contract for the tstack.json descriptor
    Schema,
    /// Print (or open) the web builder link for a selection
    Builder(BuilderArgs),
}

/// Stack selection flags shared by `create` and `builder`
#[derive(ClapArgs, Debug, Default)]
pub struct StackFlags {
    /// Frontend framework(s) (comma-separated, e.g. next,native-nativewind)
    #[arg(long, value_delimiter = ',')]
    pub frontend: Option<Vec<String>>,

    /// Backend framework
    #[arg(long)]
    pub backend: Option<String>,

    /// Server runtime
    #[arg(long)]
    pub runtime: Option<String>,

    /// Database engine
    #[arg(long)]
    pub database: Option<String>,

    /// ORM
    #[arg(long)]
    pub orm: Option<String>,

    /// API style
    #[arg(long)]
    pub api: Option<String>,

    /// Authentication (better-auth or none; true/false also accepted)
    #[arg(long)]
    pub auth: Option<String>,

    /// Hosted database setup
    #[arg(long = "db-setup")]
    pub db_setup: Option<String>,

    /// Web deployment target
    #[arg(long = "web-deploy")]
    pub web_deploy: Option<String>,

    /// Package manager
    #[arg(long = "package-manager")]
    pub package_manager: Option<String>,

    /// Addons (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub addons: Option<Vec<String>>,

    /// Example apps (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub examples: Option<Vec<String>>,
}

impl StackFlags {
    fn seed(&self) -> PartialStack {
        let mut seed = PartialStack::new();
        if let Some(ids) = &self.frontend {
            for id in ids {
                seed.add(Category::Frontend, id);
            }
        }
        if let Some(id) = &self.backend {
            seed.set(Category::Backend, id);
        }
        if let Some(id) = &self.runtime {
            seed.set(Category::Runtime, id);
        }
        if let Some(id) = &self.database {
            seed.set(Category::Database, id);
        }
        if let Some(id) = &self.orm {
            seed.set(Category::Orm, id);
        }
        if let Some(id) = &self.api {
            seed.set(Category::Api, id);
        }
        if let Some(id) = &self.auth {
            seed.set(Category::Auth, id);
        }
        if let Some(id) = &self.db_setup {
            seed.set(Category::DbSetup, id);
        }
        if let Some(id) = &self.web_deploy {
            seed.set(Category::WebDeploy, id);
        }
        if let Some(id) = &self.package_manager {
            seed.set(Category::PackageManager, id);
        }
        if let Some(ids) = &self.addons {
            for id in ids {
                seed.add(Category::Addons, id);
            }
        }
        if let Some(ids) = &self.examples {
            for id in ids {
                seed.add(Category::Examples, id);
            }
        }
        seed
    }
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Project directory to create (defaults to the project name)
    pub directory: Option<PathBuf>,

    /// Project name recorded in the descriptor
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub stack: StackFlags,

    /// Skip git repository initialization
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Skip dependency installation
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Resolve from flags and defaults only (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Project directory containing tstack.json (defaults to the current one)
    pub directory: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct BuilderArgs {
    #[command(flatten)]
    pub stack: StackFlags,

    /// Project name to embed in the link
    #[arg(short, long)]
    pub name: Option<String>,

    /// Open the link in the default browser
    #[arg(long)]
    pub open: bool,
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let registry = Registry::builtin()?;
    let rules = RuleSet::builtin(&registry)?;

    match args.command {
        Some(Command::Create(create_args)) => create(&registry, &rules, create_args),
        Some(Command::Check(check_args)) => check(&rules, check_args),
        Some(Command::Schema) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&schema::descriptor_schema(&registry))?
            );
            Ok(())
        }
        Some(Command::Builder(builder_args)) => builder(&registry, &rules, builder_args),
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = CreateArgs {
                directory: None,
                name: None,
                stack: StackFlags::default(),
                no_git: false,
                no_install: false,
                yes: false,
            };
            create(&registry, &rules, create_args)
        }
    }
}

fn create(registry: &Registry, rules: &RuleSet, args: CreateArgs) -> Result<()> {
    let mut seed = args.stack.seed();
    if let Some(name) = &args.name {
        seed.project_name = Some(name.clone());
    }
    if args.no_git {
        seed.git = Some(false);
    }
    if args.no_install {
        seed.install = Some(false);
    }

    let resolver = Resolver::new(registry, rules);
    let state = if args.yes {
        match resolver.resolve(&seed)? {
            Resolution::Resolved(state) => state,
            Resolution::Rejected(violations) => {
                report_violations(&violations);
                anyhow::bail!(
                    "{} incompatible selection(s); nothing was written",
                    violations.len()
                );
            }
        }
    } else {
        let result = stack_core::tui::run(registry, rules, seed);

        // Ensure cursor is visible after the prompt flow
        let _ = console::Term::stderr().show_cursor();

        result?
    };

    let target_dir = args
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from(&state.project_name));
    writer::write_project(&state, &target_dir, CLI_VERSION)?;
    writer::print_next_steps(&state, &target_dir);
    Ok(())
}

fn check(rules: &RuleSet, args: CheckArgs) -> Result<()> {
    let dir = args.directory.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(DESCRIPTOR_FILE);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let descriptor = ProjectDescriptor::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if descriptor.schema_version != SCHEMA_VERSION {
        eprintln!(
            "{} descriptor was written with schema v{}; this tool speaks v{}",
            "Warning:".yellow(),
            descriptor.schema_version,
            SCHEMA_VERSION
        );
    }
    if let Some(warning) = descriptor.version_warning(CLI_VERSION) {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    let violations = rules.check_stack(&descriptor.stack.selections());
    if violations.is_empty() {
        println!(
            "{} {} validates against the current option catalog",
            "OK".green().bold(),
            path.display()
        );
        Ok(())
    } else {
        report_violations(&violations);
        anyhow::bail!("the recorded stack no longer validates")
    }
}

fn builder(registry: &Registry, rules: &RuleSet, args: BuilderArgs) -> Result<()> {
    let mut seed = args.stack.seed();
    if let Some(name) = &args.name {
        seed.project_name = Some(name.clone());
    }

    match Resolver::new(registry, rules).resolve(&seed)? {
        Resolution::Resolved(state) => {
            let link = urlstate::share_url(&state);
            println!("{link}");
            if args.open {
                open::that(&link).context("Failed to open the browser")?;
            }
            Ok(())
        }
        Resolution::Rejected(violations) => {
            report_violations(&violations);
            anyhow::bail!("cannot build a share link for an incompatible stack")
        }
    }
}

fn report_violations(violations: &[Violation]) {
    eprintln!("{}", "Incompatible stack:".red().bold());
    for violation in violations {
        eprintln!("  {} {}", "-".red(), violation);
    }
}
