use anyhow::Result;

use defstore_lib::store::FileDefinitionStore;

use crate::output::{OutputFormat, print_json};

pub fn cmd_path(store: &FileDefinitionStore, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    print_json(&serde_json::json!({ "path": store.path(), "exists": store.exists() }))?;
  } else {
    println!("{}", store.path().display());
  }
  Ok(())
}
