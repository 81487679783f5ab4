//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};

/// noin - node installer
///
/// Clone, build and deploy a Node.js project from GitHub.
#[derive(Parser, Debug)]
#[command(
    name = "noin",
    author,
    version,
    args_conflicts_with_subcommands = true,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Clone, build and deploy a Node.js project as an app or a systemd service",
    long_about = "noin clones a GitHub repository into the temp directory, builds it, copies \
                  the result to a target directory and installs it as a systemd service \
                  (Linux) or as a plain application. Settings come from .noin.json, the \
                  command line, and interactive prompts, in that order.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  noin -u dotupNET -r motobox -s motobox -t /opt/motobox\n    \
                  noin -u dotupNET -r motobox -a -t /opt/motobox -p false\n    \
                  noin\n"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install run
#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Install as application
    #[arg(short = 'a', long = "app", conflicts_with = "service")]
    pub app: bool,

    /// Install as systemd service with this name
    #[arg(short = 's', long = "service", value_name = "SERVICENAME")]
    pub service: Option<String>,

    /// Build and install packages in production mode
    #[arg(
        short = 'p',
        long = "production",
        value_name = "true|false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub production: Option<bool>,

    /// GitHub user name
    #[arg(short = 'u', long = "userName", alias = "user-name", value_name = "USERNAME")]
    pub user_name: Option<String>,

    /// GitHub repository name
    #[arg(
        short = 'r',
        long = "repositoryName",
        alias = "repository-name",
        value_name = "REPOSITORYNAME"
    )]
    pub repository_name: Option<String>,

    /// Target path to install to
    #[arg(
        short = 't',
        long = "target",
        value_name = "TARGETPATH",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub target: Option<String>,

    /// Override an existing temp clone without asking
    #[arg(
        short = 'o',
        long = "override",
        value_name = "true|false",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub override_existing: Option<bool>,

    /// Write the resolved configuration to .noin.json after a successful install
    #[arg(long)]
    pub save: bool,
}

impl InstallArgs {
    /// Target path, ignoring a bare `-t` without a value
    pub fn target_path(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    /// True when no configuration flag was given
    pub fn is_empty(&self) -> bool {
        !self.app
            && self.service.is_none()
            && self.production.is_none()
            && self.user_name.is_none()
            && self.repository_name.is_none()
            && self.target_path().is_none()
            && self.override_existing.is_none()
    }
}

/// Arguments for completions command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    noin completions --shell bash > ~/.bash_completion.d/noin\n\n\
                  Generate zsh completions:\n    noin completions --shell zsh > ~/.zfunc/_noin")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
