//! Stack Core - configuration engine for the Better-T-Stack scaffolder
//!
//! This library turns a partial set of stack choices (from CLI flags,
//! interactive prompts, or a web-builder share URL) into a validated,
//! frozen project configuration ready for a template renderer to consume.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Catalog** - `Category` and the `Registry` of selectable options
//! - **Layer 2: Rules & Resolution** - the declarative `RuleSet` and the
//!   `Resolver` that fills defaults, applies implications, and validates
//! - **Layer 3: Surfaces** - the persisted `ProjectDescriptor`, the
//!   URL-state codec, the JSON-Schema generator, and optional cliclack
//!   prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use stack_core::{PartialStack, Registry, Resolution, Resolver, RuleSet};
//!
//! let registry = Registry::builtin()?;
//! let rules = RuleSet::builtin(&registry)?;
//!
//! let mut seed = PartialStack::new();
//! seed.set(stack_core::Category::Database, "postgres");
//!
//! match Resolver::new(&registry, &rules).resolve(&seed)? {
//!     Resolution::Resolved(state) => println!("{}", state.orm),
//!     Resolution::Rejected(violations) => {
//!         for violation in violations {
//!             eprintln!("{violation}");
//!         }
//!     }
//! }
//! ```

pub mod category;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod schema;
pub mod urlstate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use category::Category;
pub use descriptor::{ProjectDescriptor, DESCRIPTOR_FILE, SCHEMA_VERSION};
pub use error::{Result, StackError};
pub use registry::{OptionDef, Registry};
pub use resolver::{PartialStack, Resolution, Resolver, StackState, DEFAULT_PROJECT_NAME};
pub use rules::{Rule, RuleKind, RuleSet, Violation, ViolationKind};

#[cfg(feature = "tui")]
pub use tui::run;

/// Tool version fallback - each binary should pass its own version when
/// building descriptors, but this keeps the library usable on its own
pub const DEFAULT_TOOL_VERSION: &str = "0.1.0";
