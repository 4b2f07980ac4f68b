use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
/// CLI application to schedule recurring group sessions and track attendance with SQLite
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Schedule recurring counseling group sessions and track attendance using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Role of the caller: admin or counselor (default from config)
    #[arg(global = true, long = "role")]
    pub role: Option<String>,

    /// Numeric identity of the caller (default from config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
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
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a session occurrence (optionally a weekly recurring anchor)
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        #[arg(long = "class", help = "Class name (identifies the series)")]
        class_name: String,

        #[arg(long = "group-name", help = "Group label shown with the class")]
        group_name: String,

        #[arg(long = "hours", help = "Session hours (HH:MM-HH:MM)")]
        hours: String,

        #[arg(long = "counselor", help = "Counselor id (defaults to the caller)")]
        counselor: Option<i64>,

        #[arg(long = "type", default_value = "", help = "Group type (Therapy, Workshop, ...)")]
        group_type: String,

        #[arg(long = "notes", default_value = "")]
        notes: String,

        #[arg(long = "location", default_value = "")]
        location: String,

        #[arg(long = "recurring", help = "Make this occurrence a recurring anchor")]
        recurring: bool,

        #[arg(
            long = "frequency",
            default_value = "weekly",
            help = "Recurrence cadence (only 'weekly' is expanded)"
        )]
        frequency: String,

        #[arg(
            long = "attendees",
            value_delimiter = ',',
            help = "Comma separated attendee ids for the roster"
        )]
        attendees: Vec<i64>,

        #[arg(long = "today", hide = true, help = "Reference day for the horizon (YYYY-MM-DD)")]
        today: Option<String>,
    },

    /// Edit an occurrence, optionally propagating to later occurrences of its series
    Edit {
        id: i64,

        #[arg(long = "class")]
        class_name: Option<String>,

        #[arg(long = "group-name")]
        group_name: Option<String>,

        #[arg(long = "date", help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "hours", help = "Session hours (HH:MM-HH:MM)")]
        hours: Option<String>,

        #[arg(long = "counselor", help = "Reassign to another counselor (admin only)")]
        counselor: Option<i64>,

        #[arg(long = "type")]
        group_type: Option<String>,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "location")]
        location: Option<String>,

        #[arg(long = "recurring", conflicts_with = "no_recurring")]
        recurring: bool,

        #[arg(long = "no-recurring")]
        no_recurring: bool,

        #[arg(long = "frequency")]
        frequency: Option<String>,

        #[arg(
            long = "attendees",
            value_delimiter = ',',
            num_args = 0..,
            help = "Replace the roster with these attendee ids (empty clears it)"
        )]
        attendees: Option<Vec<i64>>,

        #[arg(
            long = "propagate",
            help = "Apply the change to all later occurrences of the series"
        )]
        propagate: bool,
    },

    /// Delete an occurrence (or it and all later ones of its series)
    Del {
        id: i64,

        #[arg(long = "future", help = "Also delete all later occurrences of the series")]
        future: bool,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Add attendees to an occurrence roster
    Assign {
        id: i64,

        #[arg(long = "group", conflicts_with = "attendee", required_unless_present = "attendee")]
        group: Option<i64>,

        #[arg(long = "attendee")]
        attendee: Option<i64>,
    },

    /// Remove an attendee from an occurrence roster
    Unassign {
        id: i64,

        #[arg(long = "attendee")]
        attendee: i64,
    },

    /// Lock an occurrence against any change (admin only)
    Lock { id: i64 },

    /// Unlock an occurrence (admin only)
    Unlock { id: i64 },

    /// Materialize missing occurrences of recurring sessions (run once a day)
    Generate {
        #[arg(long = "today", help = "Reference day (YYYY-MM-DD), defaults to today")]
        today: Option<String>,

        #[arg(long = "horizon", help = "Days ahead to fill (default from config)")]
        horizon: Option<i64>,
    },

    /// List occurrences
    List {
        #[arg(long = "class")]
        class_name: Option<String>,

        #[arg(long = "counselor")]
        counselor: Option<i64>,

        #[arg(long = "from", help = "First day (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Last day (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Manage attendees
    Attendee {
        #[command(subcommand)]
        action: AttendeeAction,
    },

    /// Manage attendee groups
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Record attendance of one attendee on an occurrence
    Attend {
        id: i64,

        #[arg(long = "attendee")]
        attendee: i64,

        #[arg(long = "status", default_value = "Present", help = "Present, Absent, or free text")]
        status: String,

        #[arg(long = "in", help = "Time in (HH:MM)")]
        time_in: Option<String>,

        #[arg(long = "out", help = "Time out (HH:MM)")]
        time_out: Option<String>,

        #[arg(long = "notes", default_value = "")]
        notes: String,

        #[arg(long = "location", default_value = "")]
        location: String,
    },

    /// Attendance report, printed or exported
    Report {
        #[arg(long = "from")]
        from: Option<String>,

        #[arg(long = "to")]
        to: Option<String>,

        #[arg(long = "class")]
        class_name: Option<String>,

        #[arg(long = "counselor")]
        counselor: Option<i64>,

        #[arg(long = "attendee")]
        attendee: Option<i64>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Export to FILE instead of printing")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum AttendeeAction {
    /// Register an attendee
    Add {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "code", help = "External attendee id (unique)")]
        code: String,

        #[arg(long = "notes", default_value = "")]
        notes: String,
    },

    /// List attendees
    List,
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// Create a group
    Add {
        #[arg(long = "name")]
        name: String,

        #[arg(long = "details", default_value = "")]
        details: String,
    },

    /// Add an attendee to a group
    Join {
        #[arg(long = "group")]
        group: i64,

        #[arg(long = "attendee")]
        attendee: i64,
    },
}
