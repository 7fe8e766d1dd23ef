use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for kpr
/// Notes, to-dos, service hours and appointments in one SQLite file
#[derive(Parser, Debug)]
#[command(
    name = "kpr",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal-productivity CLI: notes, to-dos, service hours and appointments in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update, no log file)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Disable coloured output
    #[arg(global = true, long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// A record chosen either by id or by keyword search.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Record id
    #[arg(required_unless_present = "keyword", conflicts_with = "keyword")]
    pub id: Option<i64>,

    /// Select by keyword instead of id
    #[arg(long = "match", value_name = "KEYWORD")]
    pub keyword: Option<String>,

    /// 1-based index into the keyword matches
    #[arg(long, value_name = "N", requires = "keyword")]
    pub pick: Option<usize>,
}

#[derive(Subcommand, Debug)]
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

    /// Inspect and maintain the database
    Db {
        #[arg(long = "tables", help = "List the tables in the database")]
        tables: bool,

        #[arg(long = "schema", value_name = "TABLE", help = "Show the columns of a table")]
        schema: Option<String>,

        #[arg(long = "summary", help = "Show the row count of every table")]
        summary: bool,

        #[arg(long = "info", help = "Show database file information")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write a .zip archive instead of a plain copy")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing destination")]
        force: bool,
    },

    /// Notes
    Note {
        #[command(subcommand)]
        action: NoteCmd,
    },

    /// To-do list and completed archive
    Todo {
        #[command(subcommand)]
        action: TodoCmd,
    },

    /// Service-hour tracking
    Hours {
        #[command(subcommand)]
        action: HoursCmd,
    },

    /// Appointments
    Cal {
        #[command(subcommand)]
        action: CalCmd,
    },

    /// Filesystem helpers
    Fs {
        #[command(subcommand)]
        action: FsCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCmd {
    /// Add a note
    Add {
        name: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Search notes by name or content
    Search { keyword: String },
    /// List all notes
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one note in full
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Update a note's name and/or content
    Update {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        #[command(flatten)]
        target: Target,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCmd {
    /// Add a to-do
    Add {
        content: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        deadline: Option<String>,
    },
    /// Search to-dos by content
    Search { keyword: String },
    /// List active to-dos, or the completed archive
    List {
        #[arg(long)]
        completed: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show one to-do
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Update a to-do
    Update {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "clear_deadline")]
        deadline: Option<String>,
        #[arg(long, help = "Remove the deadline")]
        clear_deadline: bool,
    },
    /// Delete a to-do without archiving it
    Delete {
        #[command(flatten)]
        target: Target,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Mark a to-do as completed
    Done {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Subcommand, Debug)]
pub enum HoursCmd {
    /// Set the total hours to serve
    Total {
        #[arg(allow_negative_numbers = true)]
        hours: f64,
    },
    /// Log hours worked on a job
    Log {
        job: String,
        #[arg(allow_negative_numbers = true)]
        hours: f64,
        #[arg(long, value_name = "YYYY-MM-DD", help = "Defaults to today")]
        date: Option<String>,
    },
    /// List logged hours
    List {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Update a logged entry
    Update {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        job: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        hours: Option<f64>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },
    /// Delete a logged entry and give its hours back
    Delete {
        #[command(flatten)]
        target: Target,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Show the remaining balance
    Remaining,
}

#[derive(Subcommand, Debug)]
pub enum CalCmd {
    /// Add an appointment
    Add {
        title: String,
        #[arg(value_name = "YYYY-MM-DD")]
        date: String,
        #[arg(long, value_name = "HH:MM", help = "Omit for an all-day appointment")]
        time: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List appointments
    List {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one appointment
    Show {
        #[command(flatten)]
        target: Target,
    },
    /// Update an appointment
    Update {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, value_name = "HH:MM", conflicts_with = "all_day")]
        time: Option<String>,
        #[arg(long, help = "Clear the time, making it all-day")]
        all_day: bool,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long, help = "Remove the description")]
        clear_description: bool,
    },
    /// Delete an appointment
    Delete {
        #[command(flatten)]
        target: Target,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum FsCmd {
    /// Copy a file into a directory (or to a file path)
    Copy { src: String, dest: String },
    /// Move a file into a directory (or to a file path)
    Move { src: String, dest: String },
    /// Delete a file
    Delete {
        path: String,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Rename a file or directory in place
    Rename { path: String, new_name: String },
    /// Create a directory and any missing parents
    Mkdir { path: String },
    /// List the files in a directory
    List { dir: String },
    /// Zip a directory
    Zip { src: String, dest: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn target_accepts_id_or_keyword() {
        let cli = Cli::parse_from(["kpr", "note", "show", "3"]);
        let Commands::Note {
            action: NoteCmd::Show { target },
        } = cli.command
        else {
            panic!("wrong command");
        };
        assert_eq!(target.id, Some(3));

        let cli = Cli::parse_from([
            "kpr", "note", "delete", "--match", "milk", "--pick", "2", "-y",
        ]);
        let Commands::Note {
            action: NoteCmd::Delete { target, yes },
        } = cli.command
        else {
            panic!("wrong command");
        };
        assert_eq!(target.keyword.as_deref(), Some("milk"));
        assert_eq!(target.pick, Some(2));
        assert!(yes);
    }

    #[test]
    fn target_is_required() {
        assert!(Cli::try_parse_from(["kpr", "note", "show"]).is_err());
        assert!(Cli::try_parse_from(["kpr", "note", "show", "1", "--pick", "1"]).is_err());
    }

    #[test]
    fn negative_hours_reach_validation() {
        let cli = Cli::parse_from(["kpr", "hours", "log", "Food bank", "-2"]);
        assert!(matches!(
            cli.command,
            Commands::Hours {
                action: HoursCmd::Log { hours, .. }
            } if hours == -2.0
        ));
    }
}
