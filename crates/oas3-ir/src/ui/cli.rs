use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "oas3-ir")]
#[command(author, version, about = "Resolves OpenAPI schema graphs into a renderer-ready type IR")]
#[command(styles = super::Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,

  /// Enable verbose output, including every warning and debug logs
  #[arg(short, long, default_value_t = false, global = true)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, global = true, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a schema document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Resolve a schema document and write the IR as JSON
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the schema document (JSON or YAML)
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Where to write the IR. Prints to stdout when omitted
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Pretty-print the JSON output
  #[arg(long, default_value_t = false)]
  pub pretty: bool,

  /// Resolve bound-less integers to i64/u64 instead of isize/usize
  #[arg(long, default_value_t = false)]
  pub fixed_width_integers: bool,

  /// Synthetic body models that keep their generated name (comma-separated)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub exclude_body: Option<Vec<String>>,

  /// Rename a response type, e.g. `InlineResponse200=Widget` (repeatable)
  #[arg(long, value_name = "TYPE=NAME")]
  pub rename_response: Option<Vec<String>>,

  /// Tag for operations that declare none
  #[arg(long, value_name = "TAG")]
  pub default_tag: Option<String>,

  /// Keep a leading `namespace/` in operation ids
  #[arg(long, default_value_t = false)]
  pub keep_operation_namespace: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations with their resolved method names
  Operations {
    /// Path to the schema document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// List all models with their final class names
  Models {
    /// Path to the schema document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
