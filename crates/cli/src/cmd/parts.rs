//! Part definition commands.

use std::str::FromStr;

use anyhow::{Context, Result, bail};

use defstore_lib::record::ContentPartDefinitionRecord;
use defstore_lib::store::{DefinitionStore, FileDefinitionStore, ScopedCache};

use crate::output::{OutputFormat, print_json, print_success};

/// A `NAME:TYPE` field argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: String,
  pub field_type: String,
}

impl FromStr for FieldSpec {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once(':') {
      Some((name, field_type)) if !name.is_empty() && !field_type.is_empty() => Ok(Self {
        name: name.to_string(),
        field_type: field_type.to_string(),
      }),
      _ => Err(format!("expected NAME:TYPE, got '{}'", s)),
    }
  }
}

pub fn cmd_add_part(store: &FileDefinitionStore, name: &str, fields: Vec<FieldSpec>, output: OutputFormat) -> Result<()> {
  let mut scope = ScopedCache::new();
  let record = store
    .load_for_mutation(&mut scope)
    .with_context(|| format!("Failed to load {}", store.path().display()))?;

  let part = fields
    .into_iter()
    .fold(ContentPartDefinitionRecord::new(name), |part, field| {
      part.with_field(field.field_type, field.name)
    });

  let replaced = record.borrow().content_part(name).is_some();
  record.borrow_mut().upsert_content_part(part.clone());
  store.save(&record.borrow()).context("Failed to save content definitions")?;

  if output.is_json() {
    print_json(&serde_json::json!({ "replaced": replaced, "part": part }))?;
  } else if replaced {
    print_success(&format!("Replaced part {}", name));
  } else {
    print_success(&format!("Added part {}", name));
  }
  Ok(())
}

pub fn cmd_remove_part(store: &FileDefinitionStore, name: &str, output: OutputFormat) -> Result<()> {
  let mut scope = ScopedCache::new();
  let record = store
    .load_for_mutation(&mut scope)
    .with_context(|| format!("Failed to load {}", store.path().display()))?;

  if !record.borrow_mut().remove_content_part(name) {
    bail!("Part not found: {}", name);
  }
  store.save(&record.borrow()).context("Failed to save content definitions")?;

  if output.is_json() {
    print_json(&serde_json::json!({ "removed": name }))?;
  } else {
    print_success(&format!("Removed part {}", name));
  }
  Ok(())
}
