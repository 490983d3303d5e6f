//! Content type commands.

use anyhow::{Context, Result, bail};

use defstore_lib::record::ContentTypeDefinitionRecord;
use defstore_lib::store::{DefinitionStore, FileDefinitionStore, ScopedCache};

use crate::output::{OutputFormat, print_json, print_success};

pub fn cmd_add_type(
  store: &FileDefinitionStore,
  name: &str,
  display_name: Option<String>,
  parts: Vec<String>,
  output: OutputFormat,
) -> Result<()> {
  let mut scope = ScopedCache::new();
  let record = store
    .load_for_mutation(&mut scope)
    .with_context(|| format!("Failed to load {}", store.path().display()))?;

  let mut content_type = ContentTypeDefinitionRecord::new(name);
  if let Some(display_name) = display_name {
    content_type.display_name = display_name;
  }
  for part in parts {
    content_type = content_type.with_part(part);
  }

  let replaced = record.borrow().content_type(name).is_some();
  record.borrow_mut().upsert_content_type(content_type.clone());
  store.save(&record.borrow()).context("Failed to save content definitions")?;

  if output.is_json() {
    print_json(&serde_json::json!({ "replaced": replaced, "content_type": content_type }))?;
  } else if replaced {
    print_success(&format!("Replaced content type {}", name));
  } else {
    print_success(&format!("Added content type {}", name));
  }
  Ok(())
}

pub fn cmd_remove_type(store: &FileDefinitionStore, name: &str, output: OutputFormat) -> Result<()> {
  let mut scope = ScopedCache::new();
  let record = store
    .load_for_mutation(&mut scope)
    .with_context(|| format!("Failed to load {}", store.path().display()))?;

  if !record.borrow_mut().remove_content_type(name) {
    bail!("Content type not found: {}", name);
  }
  store.save(&record.borrow()).context("Failed to save content definitions")?;

  if output.is_json() {
    print_json(&serde_json::json!({ "removed": name }))?;
  } else {
    print_success(&format!("Removed content type {}", name));
  }
  Ok(())
}
