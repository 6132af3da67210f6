// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::BASE_URL_ENV;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Base URL of the notes backend (overrides the config file)
    #[arg(short, long, value_name = "URL", global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List one page of notes
    List {
        /// Page to show, starting at 1
        #[arg(long, value_name = "PAGE", default_value_t = 1)]
        page: u32,

        /// Notes per page (defaults to the configured page size)
        #[arg(long, value_name = "SIZE", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,

        /// Output the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,
    },

    /// Change the title and/or content of a note
    Edit {
        /// Note ID to edit
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Page through notes interactively
    Browse {
        /// Notes per page (defaults to the configured page size)
        #[arg(long, value_name = "SIZE", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: Option<u32>,
    },
}
