//! Scaffolder renders a template directory into a new project.
//! It collects answers to the template's prompts, renders `*.tpl` files with
//! them, copies everything else and optionally runs an init script.

/// Run orchestration from command line to cleanup
pub mod app;

/// Command-line interface module
pub mod cli;

/// Prompt definitions loading
/// Supports YAML and JSON formats (prompts.yaml, prompts.yml, prompts.json)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and fatal error handling
pub mod error;

/// Path predicates deciding which template files are generated
pub mod filter;

/// Init script execution
pub mod hooks;

/// Ignore patterns read from the scaffold metadata directory
pub mod ignore;

/// Logger configuration
pub mod logger;

/// Content processing chain: rendering and writing
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template tree traversal
pub mod provider;

/// Template rendering engine
pub mod renderer;
