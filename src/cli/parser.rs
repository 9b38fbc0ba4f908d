use clap::{Parser, Subcommand};

/// Command-line interface definition for timesquish
/// Clock in and out, squish entries and follow your earnings with SQLite
#[derive(Parser)]
#[command(
    name = "timesquish",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work sessions, squish them into summary blocks and follow weekly and pay-period earnings",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Start a work session
    In {
        #[arg(long = "at", help = "Clock-in timestamp (YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,

        #[arg(long = "rate", help = "Hourly rate for this session (default: configured rate)")]
        rate: Option<String>,
    },

    /// Close the active work session
    Out {
        #[arg(long = "at", help = "Clock-out timestamp (YYYY-MM-DD HH:MM), default now")]
        at: Option<String>,
    },

    /// Show the active session, its earnings and the week so far
    Status {
        #[arg(long = "at", help = "Evaluate the status at this timestamp instead of now")]
        at: Option<String>,
    },

    /// Add a closed entry manually
    Add {
        /// Start (YYYY-MM-DD HH:MM)
        start: String,

        /// End (YYYY-MM-DD HH:MM, or HH:MM on the start date)
        end: String,

        #[arg(long = "label", help = "Free text label")]
        label: Option<String>,

        #[arg(long = "rate", help = "Hourly rate (default: configured rate)")]
        rate: Option<String>,
    },

    /// Change start, end or label of an entry
    Edit {
        id: i64,

        #[arg(long = "start", help = "New start (YYYY-MM-DD HH:MM)")]
        start: Option<String>,

        #[arg(long = "end", help = "New end (YYYY-MM-DD HH:MM, or HH:MM on the start date)")]
        end: Option<String>,

        #[arg(long = "label", help = "New label (empty string clears it)")]
        label: Option<String>,
    },

    /// Delete an entry (a squished block takes its originals with it)
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Mark entries as submitted
    Submit {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,

        #[arg(long = "undo", help = "Mark the entries as not submitted")]
        undo: bool,
    },

    /// Merge entries into a single summary block
    Squish {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,
    },

    /// Split a summary block back into its originals
    Unsquish { id: i64 },

    /// List entries grouped by day
    List {
        #[arg(long = "week", help = "Show the week containing this date (YYYY-MM-DD)")]
        week: Option<String>,

        #[arg(long = "all", help = "Show every visible entry")]
        all: bool,

        #[arg(long = "hidden", help = "Include entries hidden inside squished blocks")]
        hidden: bool,

        #[arg(long = "unsubmitted", help = "Only entries not yet submitted")]
        unsubmitted: bool,

        #[arg(long = "json", help = "Print entries as JSON")]
        json: bool,
    },

    /// Week-to-date and pay-period earnings
    Summary {
        #[arg(long = "date", help = "Reference date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "weeks", default_value_t = 0, help = "Also summarize this many previous weeks")]
        weeks: usize,
    },

    /// Manage the configuration file (view, edit or set preferences)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,

        #[arg(long = "rate", help = "Set the default hourly rate")]
        rate: Option<String>,

        #[arg(long = "reminder-hours", help = "Hours before the still-clocked-in reminder (1-12)")]
        reminder_hours: Option<i64>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
