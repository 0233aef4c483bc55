use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use oas3_ir::{GenerationStats, GeneratorConfig, Orchestrator, load_document};

use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: Option<PathBuf>,
  pub pretty: bool,
  pub verbose: bool,
  pub quiet: bool,
  pub generator: GeneratorConfig,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand, verbose: bool, quiet: bool) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      pretty,
      fixed_width_integers,
      exclude_body,
      rename_response,
      default_tag,
      keep_operation_namespace,
    } = command;

    let generator = GeneratorConfig::builder()
      .pointer_sized_integers(!fixed_width_integers)
      .exclude_body_names(exclude_body.unwrap_or_default().into_iter().collect())
      .response_name_overrides(parse_renames(rename_response)?)
      .maybe_default_tag(default_tag)
      .strip_operation_namespace(!keep_operation_namespace)
      .build();

    Ok(Self {
      input,
      output,
      pretty,
      verbose,
      quiet,
      generator,
    })
  }

  async fn write_output(&self, json: String) -> anyhow::Result<()> {
    let Some(output) = &self.output else {
      println!("{json}");
      return Ok(());
    };
    if let Some(parent) = output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, json)
      .await
      .with_context(|| format!("failed to write {}", output.display()))
  }

  /// Status lines stay off stdout while the IR is written there.
  fn chatty(&self) -> bool {
    !self.quiet && self.output.is_some()
  }
}

fn parse_renames(entries: Option<Vec<String>>) -> anyhow::Result<BTreeMap<String, String>> {
  let Some(entries) = entries else {
    return Ok(BTreeMap::new());
  };

  let mut map = BTreeMap::new();
  for entry in entries {
    let (from, to) = entry
      .split_once('=')
      .ok_or_else(|| anyhow::anyhow!("Invalid rename format '{entry}': expected TYPE=NAME (e.g., InlineResponse200=Widget)"))?;
    map.insert(from.trim().to_string(), to.trim().to_string());
  }
  Ok(map)
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if self.config.chatty() {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn stat(&self, label: &str, value: String) {
    if self.config.chatty() {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Models resolved:", stats.models_resolved.to_string());
    self.stat("", format!("{} unions", stats.union_models));
    self.stat("", format!("{} map-like", stats.map_like_models));
    self.stat("Operations converted:", stats.operations_converted.to_string());
    self.stat("Models renamed:", stats.models_renamed.to_string());
    self.stat("Models dropped:", stats.models_dropped.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }
    for warning in &stats.warnings {
      if warning.is_naming() && !self.config.verbose {
        continue;
      }
      eprintln!(
        "{} {}",
        "Warning:".with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_success(&self) {
    if self.config.chatty() {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully resolved document".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_ir(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.info(&format!("Loading document from: {}", config.input.display()));
  let document = load_document(&config.input).await?;

  logger.info("Resolving types...");
  let (ir, stats) = Orchestrator::new(document, config.generator.clone())
    .run()
    .with_context(|| format!("failed to resolve {}", config.input.display()))?;
  logger.print_statistics(&stats);

  let json = if config.pretty {
    serde_json::to_string_pretty(&ir)?
  } else {
    serde_json::to_string(&ir)?
  };
  if let Some(output) = &config.output {
    logger.info(&format!("Writing to: {}", output.display()));
  }
  config.write_output(json).await?;

  logger.log_success();
  Ok(())
}
