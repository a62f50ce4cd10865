mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "satchel-cli", about = "Satchel student planner CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Grade book: courses, components, grades
    #[command(subcommand)]
    Courses(CoursesCommand),

    /// Assignment tracker
    #[command(subcommand)]
    Assignments(AssignmentsCommand),

    /// Weekly course schedule
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// Reminders
    #[command(subcommand)]
    Reminders(RemindersCommand),
}

#[derive(Subcommand)]
pub enum CoursesCommand {
    /// List courses with their current grade and GPA band
    List,

    /// Create a new course
    Add {
        /// Course name
        name: String,
    },

    /// Rename a course
    Rename {
        /// Course name (case-insensitive prefix match)
        course: String,
        /// New name
        name: String,
    },

    /// Delete a course and all its components
    Remove {
        /// Course name
        course: String,
    },

    /// Filter courses by name
    Search {
        /// Search query
        query: String,
    },

    /// Graded components of a course
    #[command(subcommand)]
    Component(ComponentCommand),
}

#[derive(Subcommand)]
pub enum ComponentCommand {
    /// Add a graded component to a course
    Add {
        /// Course name
        course: String,
        /// Component name (unique within the course)
        name: String,
        /// Weight in percentage points
        #[arg(long)]
        weight: String,
        /// Score in [0, 100], omit if not graded yet
        #[arg(long, default_value = "")]
        score: String,
    },

    /// Edit a component
    Edit {
        /// Course name
        course: String,
        /// Component name
        component: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New weight
        #[arg(long)]
        weight: Option<String>,
        /// New score ("" clears it)
        #[arg(long)]
        score: Option<String>,
    },

    /// Remove a component from a course
    Remove {
        /// Course name
        course: String,
        /// Component name
        component: String,
    },
}

#[derive(Subcommand)]
pub enum AssignmentsCommand {
    /// List assignments, due-date ascending
    List {
        /// Hide completed assignments
        #[arg(long)]
        pending: bool,
    },

    /// Add an assignment
    Add {
        /// Title (unique)
        title: String,
        /// Course name
        #[arg(long)]
        course: String,
        /// Due date: "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        due: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Priority
        #[arg(long, default_value = "medium")]
        priority: PriorityArg,
    },

    /// Edit an assignment
    Edit {
        /// Title (case-insensitive prefix match)
        title: String,
        /// New title
        #[arg(long)]
        new_title: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<PriorityArg>,
    },

    /// Mark an assignment done (or not done with --undo)
    Done {
        /// Title
        title: String,
        #[arg(long)]
        undo: bool,
    },

    /// Delete an assignment
    Remove {
        /// Title
        title: String,
    },

    /// Filter assignments by title or course
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List schedule entries
    List,

    /// Add a schedule entry
    Add {
        /// Course name (unique)
        name: String,
        /// Start time, HH:MM 24-hour
        #[arg(long)]
        start_time: String,
        /// End time, HH:MM 24-hour
        #[arg(long)]
        end_time: String,
        /// First day of term, DD.MM.YYYY
        #[arg(long)]
        start_date: String,
        /// Last day of term, DD.MM.YYYY
        #[arg(long)]
        end_date: String,
        /// Comma-separated weekdays (Monday..Friday)
        #[arg(long)]
        days: String,
        /// Room or building
        #[arg(long)]
        location: String,
    },

    /// Edit a schedule entry
    Edit {
        /// Course name (case-insensitive prefix match)
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        days: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete a schedule entry
    Remove {
        /// Course name
        name: String,
    },

    /// Filter entries by course name
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand)]
pub enum RemindersCommand {
    /// List reminders, soonest first
    List {
        /// Hide completed reminders
        #[arg(long)]
        pending: bool,
    },

    /// Add a reminder
    Add {
        /// Title
        title: String,
        /// When to fire: "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: String,
        /// Optional body text
        #[arg(long)]
        body: Option<String>,
        /// Recurrence
        #[arg(long, default_value = "none")]
        repeat: RepeatArg,
    },

    /// Edit a reminder
    Edit {
        /// Title (case-insensitive prefix match)
        title: String,
        #[arg(long)]
        new_title: Option<String>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        repeat: Option<RepeatArg>,
    },

    /// Mark a reminder completed (or pending again with --undo)
    Done {
        /// Title
        title: String,
        #[arg(long)]
        undo: bool,
    },

    /// Delete a reminder
    Remove {
        /// Title
        title: String,
    },

    /// Deliver a reminder through the notification sink right now
    Fire {
        /// Title
        title: String,
    },

    /// Run the scheduler in the foreground until interrupted
    Watch,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RepeatArg {
    None,
    Daily,
    Weekly,
    Monthly,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir.clone())?;

    match cli.command {
        Command::Courses(cmd) => commands::courses::run(&app, cmd, &cli.format),
        Command::Assignments(cmd) => commands::assignments::run(&app, cmd, &cli.format),
        Command::Schedule(cmd) => commands::schedule::run(&app, cmd, &cli.format),
        Command::Reminders(cmd) => commands::reminders::run(&app, cmd, &cli.format),
    }
}
