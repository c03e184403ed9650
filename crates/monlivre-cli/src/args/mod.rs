pub mod hints;

use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "monlivre")]
#[command(about = "MonLivre library client: loans, catalog and administration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory holding config.toml and session.toml
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Override backend.base_url from config.toml
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the user id
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored user id
    Logout,

    /// Create a student account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        confirm_password: String,
    },

    /// Show who is logged in
    Whoami,

    /// Show the logged-in student's profile and loan counters
    Profile,

    /// Borrowed books of the logged-in student
    Loans {
        #[command(subcommand)]
        command: LoanCommand,
    },

    /// Browse and borrow from the public catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Manage books and student accounts
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
pub enum LoanCommand {
    List {
        /// Keep loans whose title, author or genre contains this text
        #[arg(long, short)]
        query: Option<String>,

        #[command(flatten)]
        view_mode: ViewModeArgs,
    },

    Show {
        id: i64,
    },

    /// Extend the due date of a loan
    Renew {
        id: i64,
    },

    /// Give a book back
    Return {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    List {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[command(flatten)]
        view_mode: ViewModeArgs,
    },

    Show {
        id: i64,
    },

    Borrow {
        id: i64,

        /// Planned return date (YYYY-MM-DD)
        #[arg(long)]
        return_date: String,
    },
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Books {
        #[command(subcommand)]
        command: BookCommand,
    },

    Students {
        #[command(subcommand)]
        command: StudentCommand,
    },
}

#[derive(Subcommand)]
pub enum BookCommand {
    List {
        /// Match title, author or genre
        #[arg(long, short)]
        query: Option<String>,

        #[command(flatten)]
        view_mode: ViewModeArgs,
    },

    Add {
        #[command(flatten)]
        fields: BookFields,
    },

    Update {
        id: i64,

        #[command(flatten)]
        fields: BookFields,
    },

    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BookFields {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub genre: String,

    #[arg(long)]
    pub isbn: String,

    #[arg(long)]
    pub published_year: Option<i32>,

    #[arg(long, default_value = "1")]
    pub copies: i64,

    #[arg(long)]
    pub cover_url: Option<String>,
}

#[derive(Subcommand)]
pub enum StudentCommand {
    List {
        /// Match name or email
        #[arg(long, short)]
        query: Option<String>,

        #[command(flatten)]
        view_mode: ViewModeArgs,
    },

    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },

    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },

    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewModeArgs {
    #[arg(
        long,
        help = "Minimal output (IDs only, for scripting)",
        group = "view_mode"
    )]
    pub quiet: bool,

    #[arg(long, help = "Compact output (one line per item)", group = "view_mode")]
    pub compact: bool,

    #[arg(long, help = "Verbose output (all fields)", group = "view_mode")]
    pub verbose: bool,
}

impl ViewModeArgs {
    pub fn resolve(&self) -> crate::presentation::ViewMode {
        use crate::presentation::ViewMode;

        if self.quiet {
            ViewMode::Minimal
        } else if self.compact {
            ViewMode::Compact
        } else if self.verbose {
            ViewMode::Verbose
        } else {
            ViewMode::default()
        }
    }
}
