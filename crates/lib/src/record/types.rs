use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form settings attached to a definition. Stored verbatim.
pub type Settings = Map<String, Value>;

/// The content definition document of one tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefinitionRecord {
  #[serde(default)]
  pub content_type_definition_records: Vec<ContentTypeDefinitionRecord>,
  #[serde(default)]
  pub content_part_definition_records: Vec<ContentPartDefinitionRecord>,
}

/// A content type and the parts it is made of.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentTypeDefinitionRecord {
  pub name: String,
  #[serde(default)]
  pub display_name: String,
  #[serde(default)]
  pub settings: Settings,
  #[serde(default)]
  pub content_type_part_definition_records: Vec<ContentTypePartDefinitionRecord>,
}

/// Attachment of a part to a content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentTypePartDefinitionRecord {
  /// Name of the part definition being attached.
  pub part_name: String,
  /// Name of the attachment; equals `part_name` unless the part is reused.
  pub name: String,
  #[serde(default)]
  pub settings: Settings,
}

/// A reusable part and its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentPartDefinitionRecord {
  pub name: String,
  #[serde(default)]
  pub settings: Settings,
  #[serde(default)]
  pub content_part_field_definition_records: Vec<ContentPartFieldDefinitionRecord>,
}

/// A field on a part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentPartFieldDefinitionRecord {
  /// Field type, e.g. `TextField`.
  pub field_name: String,
  pub name: String,
  #[serde(default)]
  pub settings: Settings,
}

impl DefinitionRecord {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.content_type_definition_records.is_empty() && self.content_part_definition_records.is_empty()
  }

  pub fn content_type(&self, name: &str) -> Option<&ContentTypeDefinitionRecord> {
    self.content_type_definition_records.iter().find(|t| t.name == name)
  }

  pub fn content_type_mut(&mut self, name: &str) -> Option<&mut ContentTypeDefinitionRecord> {
    self.content_type_definition_records.iter_mut().find(|t| t.name == name)
  }

  /// Replaces the type with the same name in place, or appends it.
  pub fn upsert_content_type(&mut self, record: ContentTypeDefinitionRecord) {
    match self.content_type_mut(&record.name) {
      Some(existing) => *existing = record,
      None => self.content_type_definition_records.push(record),
    }
  }

  /// Returns `true` if a type was removed.
  pub fn remove_content_type(&mut self, name: &str) -> bool {
    let before = self.content_type_definition_records.len();
    self.content_type_definition_records.retain(|t| t.name != name);
    self.content_type_definition_records.len() != before
  }

  pub fn content_part(&self, name: &str) -> Option<&ContentPartDefinitionRecord> {
    self.content_part_definition_records.iter().find(|p| p.name == name)
  }

  /// Replaces the part with the same name in place, or appends it.
  pub fn upsert_content_part(&mut self, record: ContentPartDefinitionRecord) {
    match self
      .content_part_definition_records
      .iter_mut()
      .find(|p| p.name == record.name)
    {
      Some(existing) => *existing = record,
      None => self.content_part_definition_records.push(record),
    }
  }

  /// Returns `true` if a part was removed.
  pub fn remove_content_part(&mut self, name: &str) -> bool {
    let before = self.content_part_definition_records.len();
    self.content_part_definition_records.retain(|p| p.name != name);
    self.content_part_definition_records.len() != before
  }
}

impl ContentTypeDefinitionRecord {
  /// A type with its display name defaulting to its name.
  pub fn new(name: impl Into<String>) -> Self {
    let name = name.into();
    Self {
      display_name: name.clone(),
      name,
      ..Default::default()
    }
  }

  /// Attaches a part under its own name.
  pub fn with_part(mut self, part_name: impl Into<String>) -> Self {
    let part_name = part_name.into();
    self
      .content_type_part_definition_records
      .push(ContentTypePartDefinitionRecord {
        name: part_name.clone(),
        part_name,
        settings: Settings::new(),
      });
    self
  }
}

impl ContentPartDefinitionRecord {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn with_field(mut self, field_name: impl Into<String>, name: impl Into<String>) -> Self {
    self
      .content_part_field_definition_records
      .push(ContentPartFieldDefinitionRecord {
        field_name: field_name.into(),
        name: name.into(),
        settings: Settings::new(),
      });
    self
  }
}
