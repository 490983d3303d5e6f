//! Show command implementation.
//!
//! Displays the content types and parts of a tenant.

use anyhow::{Context, Result};

use defstore_lib::store::{DefinitionStore, FileDefinitionStore, ScopedCache};

use crate::output::{OutputFormat, count_label, print_info, print_json, print_stat, symbols};

pub fn cmd_show(store: &FileDefinitionStore, verbose: bool, output: OutputFormat) -> Result<()> {
  let scope = ScopedCache::new();
  let (_, record) = store
    .get_for_read(&scope)
    .with_context(|| format!("Failed to load {}", store.path().display()))?;
  let record = record.borrow();

  if output.is_json() {
    return print_json(&*record);
  }

  if !store.exists() {
    print_info("No content definitions saved yet.");
  }

  print_stat("Document", &store.path().display().to_string());
  print_stat(
    "Content types",
    &count_label(record.content_type_definition_records.len(), "type"),
  );
  print_stat("Parts", &count_label(record.content_part_definition_records.len(), "part"));

  if !record.content_type_definition_records.is_empty() {
    println!();
    println!("Content types:");
    for content_type in &record.content_type_definition_records {
      if content_type.display_name.is_empty() || content_type.display_name == content_type.name {
        println!("  {} {}", symbols::INFO, content_type.name);
      } else {
        println!("  {} {} ({})", symbols::INFO, content_type.name, content_type.display_name);
      }
      if verbose {
        for part in &content_type.content_type_part_definition_records {
          println!("      {}", part.name);
        }
      }
    }
  }

  if !record.content_part_definition_records.is_empty() {
    println!();
    println!("Parts:");
    for part in &record.content_part_definition_records {
      println!(
        "  {} {} ({})",
        symbols::INFO,
        part.name,
        count_label(part.content_part_field_definition_records.len(), "field")
      );
      if verbose {
        for field in &part.content_part_field_definition_records {
          println!("      {}: {}", field.name, field.field_name);
        }
      }
    }
  }

  Ok(())
}
