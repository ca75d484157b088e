//! Command-line argument definitions for the Living Archive CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the dataset, the configuration file
//! and the logging verbosity; the [`Command`] chooses what to do.

use clap::{Parser, Subcommand};

use living_archive::{OutputFormat, catalog::Region, entity::EntityType};

/// Command-line arguments for the Living Archive
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a dataset JSON file (defaults to the bundled archive)
    #[arg(short, long, global = true)]
    pub dataset: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Draw the family lineage of an entity
    Lineage {
        /// Name of the focus entity (case-insensitive)
        name: String,

        /// Output format (svg or text)
        #[arg(short, long, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List entities matching a word in their searchable fields
    Search { query: String },

    /// Print the full record of an entity
    Show { name: String },

    /// Count entities per type, or list the entities of one type
    Types { entity_type: Option<EntityType> },

    /// List the entities of a map region
    Region {
        /// Region name or slug (west, central, east, southern, diaspora)
        region: Region,

        /// Only entities of this ethnicity
        #[arg(short, long)]
        ethnicity: Option<String>,
    },

    /// List pantheons, largest first
    Pantheons,

    /// Print a randomly chosen entity
    Random,

    /// Summarize how many entities have a generated image
    Analyze,

    /// List the entities still waiting for an image
    ListMissing,

    /// Print the image prompt of an entity
    Preview {
        name: String,

        /// Prompt variant to use, e.g. manga or regional_or_ethnic
        #[arg(short, long)]
        style: Option<String>,
    },

    /// Write the normalized dataset to a file
    Normalize { output: String },
}
