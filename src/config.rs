//! Command line configuration.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::loader::{DEFAULT_PAGE, PAGES_DIR};
use crate::pipe::{DEFAULT_PROGRAM, DEFAULT_WORKING_DIR};

/// Command line configuration for cubedocs.
#[derive(Debug, Clone, Parser)]
#[command(name = "cubedocs", version, about, long_about = None)]
pub struct Config {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Pre-render every page of a documentation site
    Build {
        /// Site directory containing pages/
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Page written as index.html
        #[arg(long = "default", default_value = DEFAULT_PAGE)]
        default_page: String,

        /// Open the generated index in a browser
        #[arg(long)]
        open: bool,
    },

    /// Print the content region of the startup page
    Render {
        /// Site directory containing pages/
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Location whose fragment selects the page (e.g. index.html#syntax)
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Pipe `ls();` into the Cube interpreter and relay its output
    Pipe {
        /// Interpreter executable
        #[arg(long, default_value = DEFAULT_PROGRAM)]
        program: PathBuf,

        /// Working directory of the interpreter
        #[arg(long, default_value = DEFAULT_WORKING_DIR)]
        dir: PathBuf,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the site root or its pages directory does not exist.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Build { root, .. } | Command::Render { root, .. } => {
                if !root.exists() {
                    bail!("Site path does not exist: {}", root.display());
                }
                if !root.join(PAGES_DIR).is_dir() {
                    bail!("Site has no {} directory: {}", PAGES_DIR, root.display());
                }
            }
            Command::Pipe { .. } => {}
        }

        Ok(())
    }

    /// Log filter for the verbosity flags.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub fn log_filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if self.quiet {
            EnvFilter::new("warn")
        } else if self.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    }

    /// Initialises tracing based logging on stderr.
    pub fn init_logging(&self) {
        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.log_filter())
            .with_writer(std::io::stderr)
            .try_init();
    }
}
