use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How `attrset merge` prints its result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `name="value"` pairs on one line, HTML-escaped
    #[default]
    String,
    /// One `name=value` pair per line, unescaped
    Pairs,
    /// The merged tree as JSON, token lists as strings
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "attrset",
    bin_name = "attrset",
    version,
    disable_help_subcommand = true,
    after_help = "Attributes are JSON objects, inline or read from a file with @path:\n  attrset merge '{\"class\": \"btn\"}' @primary.json"
)]
#[command(about = "Merge and render HTML attribute sets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to attrset.toml in the user config directory)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge attribute sets left to right and print the result
    #[command(alias = "m", display_order = 1)]
    Merge {
        /// Attribute sets: inline JSON or @path to a JSON file
        #[arg(required = true, num_args = 1..)]
        sets: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::String)]
        format: OutputFormat,
    },

    /// Normalize values into one token list
    #[command(alias = "t", display_order = 2)]
    Tokens {
        /// Values: JSON when it parses (arrays, flag objects), plain text otherwise
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Render an element with merged attributes
    #[command(display_order = 3)]
    Tag {
        /// Element name (e.g. button, a)
        name: String,

        /// Attribute sets: inline JSON or @path to a JSON file
        #[arg(num_args = 0..)]
        sets: Vec<String>,

        /// Element content, HTML-escaped
        #[arg(long, short)]
        content: Option<String>,
    },

    /// Show configuration
    #[command(display_order = 10)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as JSON
    Show,

    /// Print the config file location
    Path,

    /// Print a commented attrset.toml with the defaults
    Template,
}
