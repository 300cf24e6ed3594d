//! Scaffolder's command line entry point.

use scaffolder::{
    app::Scaffolder, error::ExitOnFatal, hooks::ProcessScriptRunner, prompt::DialoguerPrompter,
};

/// Main application entry point.
fn main() {
    let prompter = DialoguerPrompter::new();
    let runner = ProcessScriptRunner;
    let fatal = ExitOnFatal;

    Scaffolder::new(&prompter, &runner, &fatal).run(std::env::args_os());
}
