//! Common constants used throughout the scaffolder.

/// Scaffold metadata directory at the template root. Never copied to the output.
pub const METADATA_DIR: &str = ".scaffold-config";

/// Supported prompt definition file names, tried in order
pub const PROMPT_FILES: [&str; 3] = ["prompts.yaml", "prompts.yml", "prompts.json"];

/// Optional script executed after generation
pub const INIT_SCRIPT: &str = "init";

/// Optional list of glob patterns excluded from generation
pub const IGNORE_FILE: &str = "ignore";

/// Extension marking a file that must be rendered before it is written
pub const TEMPLATE_SUFFIX: &str = ".tpl";
