use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn lecture notes and course documents into a study kit.
///
/// Reads a PDF, DOCX or plain-text file and prints a summary, a quiz and a
/// flashcard deck as JSON.
#[derive(Parser, Debug)]
#[command(name = "studykit", about = "Generate study kits from course documents")]
pub struct CliArgs {
    /// Config profile; keys are read as {PROFILE}_{KEY} before {KEY}
    #[arg(long, global = true, env = "STUDYKIT_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the cleaned text of a document
    Extract {
        file: PathBuf,

        /// MIME type override (guessed from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,

        /// Emit kind, page count and text as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a study kit for a document
    Generate {
        file: PathBuf,

        /// MIME type override (guessed from the extension otherwise)
        #[arg(long)]
        mime: Option<String>,

        /// Give up after this many seconds and print a degraded kit
        #[arg(long)]
        budget_secs: Option<u64>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the effective configuration with secrets redacted
    Config,
}
