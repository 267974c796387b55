use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use redmine_cli::{UserInclude, UserStatus, UserStatusFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "redmine")]
#[command(about = "A CLI for Redmine user administration", version)]
#[command(after_help = "EXAMPLES:
    redmine users list                 List active users (first page)
    redmine users list --all           List every user
    redmine users show 5 --include memberships
    redmine users lock 5               Lock an account")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log HTTP traffic and show detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage users
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    redmine users list --status locked
    redmine users show 5
    redmine users set-status 5 active"
    )]
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    redmine completions bash > ~/.bash_completion.d/redmine
    redmine completions zsh > ~/.zfunc/_redmine
    redmine completions fish > ~/.config/fish/completions/redmine.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    redmine init")]
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    redmine users list --limit 50 --offset 100
    redmine users list --status all --name smith
    redmine users list --group-id 7"
    )]
    List(UserListArgs),
    /// Show one user
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    redmine users show 5
    redmine users show 5 --include memberships --include groups"
    )]
    Show {
        /// Numeric user id
        id: u32,

        /// Embed related data (repeatable)
        #[arg(long, value_enum)]
        include: Vec<UserInclude>,
    },
    /// Print the total number of users
    Count,
    /// Change the account status of a user
    #[command(after_help = "EXAMPLES:
    redmine users set-status 5 locked
    redmine users set-status 5 active")]
    SetStatus {
        /// Numeric user id
        id: u32,

        /// New status
        #[arg(value_enum)]
        status: UserStatus,
    },
    /// Lock a user account
    Lock {
        /// Numeric user id
        id: u32,
    },
    /// Unlock (activate) a user account
    Unlock {
        /// Numeric user id
        id: u32,
    },
}

#[derive(Args, Clone)]
pub struct UserListArgs {
    /// Filter by account status
    #[arg(long, value_enum)]
    pub status: Option<UserStatusFilter>,

    /// Filter by login, name or mail substring
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by group membership
    #[arg(long)]
    pub group_id: Option<u32>,

    /// Number of users to skip
    #[arg(long, default_value = "0")]
    pub offset: u32,

    /// Maximum number of users to show (server default when omitted)
    #[arg(long, short)]
    pub limit: Option<u32>,

    /// Fetch every user, page by page (ignores --offset and --limit)
    #[arg(long, conflicts_with_all = ["status", "name", "group_id"])]
    pub all: bool,
}

impl UserListArgs {
    pub fn has_filters(&self) -> bool {
        self.status.is_some() || self.name.is_some() || self.group_id.is_some()
    }
}
