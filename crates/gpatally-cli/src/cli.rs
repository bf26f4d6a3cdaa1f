use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Import PDF transcripts and compute GPA readouts, projections, and
/// advisories.
#[derive(Debug, Parser)]
#[command(name = "gpatally", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a transcript and print GPA readouts and advisories
    Gpa {
        /// Path to the transcript PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Goal GPA for the projection readout (suppressed if not a number)
        #[arg(long)]
        goal: Option<String>,

        /// Credits planned for the pending term (suppressed if zero or not
        /// a number)
        #[arg(long)]
        pending_credits: Option<String>,

        /// Merit scholarship holder: warn below the retention minimum
        #[arg(long)]
        merit_scholar: bool,

        /// Pre-health track: include the BCPM GPA readout
        #[arg(long)]
        pre_health: bool,

        /// Graduating soon: evaluate Latin honors tiers
        #[arg(long)]
        graduating_soon: bool,

        /// Y tolerance for line reconstruction (default: 0, exact match)
        #[arg(long, default_value_t = 0.0)]
        y_tolerance: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the course records parsed from a transcript
    Courses {
        /// Path to the transcript PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Y tolerance for line reconstruction (default: 0, exact match)
        #[arg(long, default_value_t = 0.0)]
        y_tolerance: f64,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print reconstructed text lines per page (debugging aid)
    Lines {
        /// Path to the transcript PDF
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Y tolerance for line reconstruction (default: 0, exact match)
        #[arg(long, default_value_t = 0.0)]
        y_tolerance: f64,

        /// Only show candidate course rows
        #[arg(long)]
        course_rows: bool,
    },
}

/// Output format for the gpa/courses subcommands.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}
