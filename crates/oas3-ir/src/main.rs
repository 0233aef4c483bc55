#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

/// Warnings are printed by the commands themselves, so the log stays at
/// `error` unless `--verbose` asks for the debug trail.
fn init_tracing(verbose: bool) {
  let level = if verbose { Level::DEBUG } else { Level::ERROR };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Operations { input } => ui::commands::list_operations(&input, &colors).await?,
      ListCommands::Models { input } => ui::commands::list_models(&input, &colors).await?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command, cli.verbose, cli.quiet)?;
      ui::commands::generate_ir(config, &colors).await?;
    }
  }

  Ok(())
}
