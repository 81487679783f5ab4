//! Install command implementation
//!
//! The default action of `noin`: load the configuration from the working
//! directory and the command line, then run the install pipeline against the
//! real terminal and shell.

use std::env;

use crate::cli::InstallArgs;
use crate::error::Result;
use crate::pipeline::{InstallPipeline, PipelineOptions};
use crate::platform::Platform;
use crate::process::ShellRunner;
use crate::prompt::TerminalPrompter;

/// Run the install
pub fn run(args: &InstallArgs) -> Result<()> {
    let mut options = PipelineOptions::new(Platform::current()?, env::current_dir()?);
    options.save = args.save;

    let prompter = TerminalPrompter;
    let runner = ShellRunner;
    let pipeline = InstallPipeline::load(args, &prompter, &runner, options)?;
    pipeline.run()?;

    Ok(())
}
