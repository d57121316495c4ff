//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the zanata binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::session::DEFAULT_DOMAIN;

/// Zanata command-line interface.
#[derive(Parser, Debug)]
#[command(name = "zanata", about = "Zanata translation platform CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Credential domain to use from the key file.
    #[arg(long, global = true, env = "ZANATA_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Key file with server URLs and API keys (defaults to zanata.ini in
    /// the user config directory).
    #[arg(long, global = true, env = "ZANATA_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all projects.
    Projects,

    /// Show a single project with its iterations.
    Project {
        /// The project slug.
        id: String,
    },

    /// List the iterations of a project.
    #[command(alias = "versions")]
    Iterations {
        /// The project slug.
        project: String,
    },

    /// Look up translation memory suggestions.
    Suggest {
        /// Locale of the query strings.
        #[arg(long, default_value = "en-US")]
        from: String,

        /// Locale to get translations in.
        #[arg(long)]
        to: String,

        /// Strings to look up.
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Download a translated document in gettext format.
    Download {
        /// The project slug.
        project: String,

        /// The iteration slug.
        iteration: String,

        /// The document name.
        document: String,

        /// The target locale.
        locale: String,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
