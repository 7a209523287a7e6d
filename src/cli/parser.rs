use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for lapchart
#[derive(Parser)]
#[command(
    name = "lapchart",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mark work laps on a video timeline and turn them into a standard-work chart",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

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

    /// Print the internal activity log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a new project (discards the current laps)
    New {
        #[arg(long = "process", help = "Process name (工程名)")]
        process: Option<String>,

        #[arg(long = "element", help = "Element work name (要素作業名)")]
        element: Option<String>,

        #[arg(long = "video", value_name = "FILE", help = "Video file (mp4, m4v, mov)")]
        video: Option<String>,

        #[arg(
            long = "duration",
            value_name = "SEC|MM:SS",
            help = "Length of the video"
        )]
        duration: Option<String>,

        #[arg(long = "takt", value_name = "SEC", help = "Takt time in seconds")]
        takt: Option<f64>,
    },

    /// Mark a lap at the given playback position
    Lap {
        /// Playback position: seconds (fractions are floored) or mm:ss
        #[arg(value_name = "SEC|MM:SS")]
        at: String,
    },

    /// Redo from lap NO: every later lap is dropped
    Redo {
        /// Lap number as shown by `list`
        no: usize,
    },

    /// Edit the annotations of a lap
    Edit {
        /// Lap number as shown by `list`
        no: usize,

        #[arg(long = "work", help = "Work name (作業名)")]
        work: Option<String>,

        #[arg(
            long = "cat",
            help = "Category: m=manual (手作業), w=walk (歩行), a=auto (自動)"
        )]
        cat: Option<String>,

        #[arg(long = "key", help = "Key point (急所)")]
        key: Option<String>,

        #[arg(long = "reason", help = "Reason for the key point (急所の理由)")]
        reason: Option<String>,
    },

    /// List the laps of the current project
    List {
        #[arg(
            long = "at",
            value_name = "SEC|MM:SS",
            help = "Mark the lap under this playback position"
        )]
        at: Option<String>,
    },

    /// Show the standard-work rows built from the laps
    Rows,

    /// Replace the current project with a project file (.csv) or lap payload (.json)
    Import {
        #[arg(value_name = "FILE")]
        file: String,

        #[arg(long, help = "JSON `sec` values are per-lap durations, not absolute starts")]
        legacy: bool,
    },

    /// Save the project file (default name: 【process】element.csv)
    Save {
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the laps
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Render the standard-work chart (.svg or .pdf)
    Chart {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long = "takt",
            value_name = "SEC",
            help = "Takt time in seconds (default: project, config, then total duration)"
        )]
        takt: Option<f64>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
