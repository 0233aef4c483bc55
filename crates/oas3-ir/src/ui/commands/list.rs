use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use oas3_ir::{GeneratedIr, GeneratorConfig, Orchestrator, load_document};

use crate::ui::{Colors, term_width};

async fn resolve(input: &Path) -> anyhow::Result<GeneratedIr> {
  let document = load_document(input).await?;
  let (ir, _) = Orchestrator::new(document, GeneratorConfig::default()).run()?;
  Ok(ir)
}

fn table_with_header(colors: &Colors, columns: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for column in columns {
    row.add_cell(Cell::new(column).fg(Colors::cell(colors.label())));
  }
  table.set_header(row);
  table
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let ir = resolve(input).await?;
  let mut table = table_with_header(colors, &["METHOD NAME", "METHOD", "PATH", "TAG"]);

  for operation in ir.operations().sorted_by(|a, b| a.nickname.cmp(&b.nickname)) {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&operation.nickname)
        .fg(Colors::cell(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(&operation.http_method)
        .fg(Colors::cell(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(Colors::cell(colors.primary())));
    row.add_cell(Cell::new(&operation.tag));
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}

pub async fn list_models(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let ir = resolve(input).await?;
  let mut table = table_with_header(colors, &["CLASS NAME", "KEY", "FLAGS"]);

  for model in ir.models.values() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&model.class_name)
        .fg(Colors::cell(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&model.canonical_key).fg(Colors::cell(colors.primary())));
    row.add_cell(Cell::new(model.flags.iter().join(", ")).fg(Colors::cell(colors.accent())));
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}
