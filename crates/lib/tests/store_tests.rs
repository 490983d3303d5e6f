//! Behavior of the content definition store across scopes, files and threads.

use std::fs;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use defstore_lib::platform::paths::{ShellOptions, TenantName};
use defstore_lib::record::{ContentPartDefinitionRecord, ContentTypeDefinitionRecord, DefinitionRecord};
use defstore_lib::store::{DefinitionStore, ErrorKind, FileDefinitionStore, ScopedCache, TenantStores};
use serde_json::json;
use tempfile::TempDir;

fn temp_tenant_store() -> (TempDir, Arc<FileDefinitionStore>) {
  let temp = TempDir::new().unwrap();
  let stores = TenantStores::new(ShellOptions::new(temp.path(), "Sites"));
  let store = stores.get_or_create(&TenantName::new("Default").unwrap());
  (temp, store)
}

fn record_with_types(names: &[&str]) -> DefinitionRecord {
  let mut record = DefinitionRecord::new();
  for name in names {
    record.upsert_content_type(ContentTypeDefinitionRecord::new(*name));
  }
  record
}

// =============================================================================
// Scope behavior
// =============================================================================

#[test]
fn missing_document_reads_as_cacheable_default() {
  let (_temp, store) = temp_tenant_store();

  let (should_cache, record) = store.get_for_read(&ScopedCache::new()).unwrap();

  assert!(should_cache);
  assert_eq!(*record.borrow(), DefinitionRecord::default());
}

#[test]
fn populated_scope_returns_same_reference_not_cacheable() {
  let (_temp, store) = temp_tenant_store();
  let mut scope = ScopedCache::new();
  store.load_for_mutation(&mut scope).unwrap();

  let (first_flag, first) = store.get_for_read(&scope).unwrap();
  let (second_flag, second) = store.get_for_read(&scope).unwrap();

  assert!(!first_flag);
  assert!(!second_flag);
  assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn mutation_is_visible_to_reads_in_same_scope() {
  let (_temp, store) = temp_tenant_store();
  let mut scope = ScopedCache::new();

  let record = store.load_for_mutation(&mut scope).unwrap();
  record
    .borrow_mut()
    .upsert_content_type(ContentTypeDefinitionRecord::new("Article"));

  let (should_cache, read) = store.get_for_read(&scope).unwrap();
  assert!(!should_cache);
  assert!(Rc::ptr_eq(&record, &read));
  assert!(read.borrow().content_type("Article").is_some());

  // Nothing has been saved yet.
  assert!(!store.exists());
}

#[test]
fn mutations_compound_within_scope() {
  let (_temp, store) = temp_tenant_store();
  let mut scope = ScopedCache::new();

  store
    .load_for_mutation(&mut scope)
    .unwrap()
    .borrow_mut()
    .upsert_content_type(ContentTypeDefinitionRecord::new("Article"));
  let record = store.load_for_mutation(&mut scope).unwrap();
  record
    .borrow_mut()
    .upsert_content_part(ContentPartDefinitionRecord::new("TitlePart"));
  store.save(&record.borrow()).unwrap();

  let (_, reloaded) = store.get_for_read(&ScopedCache::new()).unwrap();
  let reloaded = reloaded.borrow();
  assert!(reloaded.content_type("Article").is_some());
  assert!(reloaded.content_part("TitlePart").is_some());
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn save_then_fresh_scope_round_trips() {
  let (_temp, store) = temp_tenant_store();
  let mut record = DefinitionRecord::new();
  let mut article = ContentTypeDefinitionRecord::new("Article").with_part("TitlePart");
  article.display_name = "News".to_string();
  article.settings.insert(
    "ContentTypeSettings".to_string(),
    json!({ "Creatable": true, "Listable": false }),
  );
  record.upsert_content_type(article);
  record.upsert_content_part(
    ContentPartDefinitionRecord::new("TitlePart")
      .with_field("TextField", "Subtitle")
      .with_field("NumericField", "Rank"),
  );

  store.save(&record).unwrap();

  let (should_cache, loaded) = store.get_for_read(&ScopedCache::new()).unwrap();
  assert!(should_cache);
  assert_eq!(*loaded.borrow(), record);
}

#[test]
fn save_creates_tenant_directory() {
  let (temp, store) = temp_tenant_store();
  assert!(!temp.path().join("Sites").exists());

  store.save(&record_with_types(&["Page"])).unwrap();

  assert!(temp.path().join("Sites").join("Default").is_dir());
  let (_, loaded) = store.get_for_read(&ScopedCache::new()).unwrap();
  assert!(loaded.borrow().content_type("Page").is_some());
}

#[test]
fn corrupt_document_fails_both_access_modes() {
  let (_temp, store) = temp_tenant_store();
  fs::create_dir_all(store.path().parent().unwrap()).unwrap();
  fs::write(store.path(), "{ \"ContentTypeDefinitionRecords\": [").unwrap();

  let read_err = store.get_for_read(&ScopedCache::new()).unwrap_err();
  assert_eq!(read_err.kind(), ErrorKind::MalformedDocument);

  let mut scope = ScopedCache::new();
  let mutate_err = store.load_for_mutation(&mut scope).unwrap_err();
  assert_eq!(mutate_err.kind(), ErrorKind::MalformedDocument);
  assert!(!scope.is_populated());
}

#[test]
fn compact_documents_are_accepted() {
  let (_temp, store) = temp_tenant_store();
  fs::create_dir_all(store.path().parent().unwrap()).unwrap();
  fs::write(
    store.path(),
    r#"{"ContentTypeDefinitionRecords":[{"Name":"Blog","DisplayName":"Blog","Settings":{},"ContentTypePartDefinitionRecords":[]}],"ContentPartDefinitionRecords":[]}"#,
  )
  .unwrap();

  let (_, record) = store.get_for_read(&ScopedCache::new()).unwrap();
  assert_eq!(*record.borrow(), record_with_types(&["Blog"]));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn concurrent_saves_never_interleave() {
  let (_temp, store) = temp_tenant_store();

  let small = record_with_types(&["Small"]);
  let large_names: Vec<String> = (0..500).map(|i| format!("LargeType{i}")).collect();
  let large = record_with_types(&large_names.iter().map(String::as_str).collect::<Vec<_>>());

  let candidates = [
    serde_json::to_string_pretty(&small).unwrap(),
    serde_json::to_string_pretty(&large).unwrap(),
  ];

  for _ in 0..10 {
    let handles: Vec<_> = [small.clone(), large.clone(), small.clone(), large.clone()]
      .into_iter()
      .map(|record| {
        let store = Arc::clone(&store);
        thread::spawn(move || store.save(&record).unwrap())
      })
      .collect();

    for handle in handles {
      handle.join().unwrap();
    }

    let content = fs::read_to_string(store.path()).unwrap();
    assert!(candidates.contains(&content), "document is a mixture of writes");
  }
}

#[test]
fn concurrent_reads_and_writes_see_whole_documents() {
  let (_temp, store) = temp_tenant_store();
  let first = record_with_types(&["A"]);
  let second = record_with_types(&["A", "B", "C"]);
  store.save(&first).unwrap();

  let writer = {
    let store = Arc::clone(&store);
    let (first, second) = (first.clone(), second.clone());
    thread::spawn(move || {
      for i in 0..50 {
        let record = if i % 2 == 0 { &second } else { &first };
        store.save(record).unwrap();
      }
    })
  };

  let readers: Vec<_> = (0..4)
    .map(|_| {
      let store = Arc::clone(&store);
      let (first, second) = (first.clone(), second.clone());
      thread::spawn(move || {
        for _ in 0..50 {
          let (_, record) = store.get_for_read(&ScopedCache::new()).unwrap();
          let record = record.borrow();
          assert!(*record == first || *record == second);
        }
      })
    })
    .collect();

  writer.join().unwrap();
  for reader in readers {
    reader.join().unwrap();
  }
}

#[test]
fn separate_scopes_get_separate_copies_and_last_writer_wins() {
  let (_temp, store) = temp_tenant_store();
  let mut scope_a = ScopedCache::new();
  let mut scope_b = ScopedCache::new();

  let a = store.load_for_mutation(&mut scope_a).unwrap();
  let b = store.load_for_mutation(&mut scope_b).unwrap();
  assert!(!Rc::ptr_eq(&a, &b));

  a.borrow_mut()
    .upsert_content_type(ContentTypeDefinitionRecord::new("FromA"));
  b.borrow_mut()
    .upsert_content_type(ContentTypeDefinitionRecord::new("FromB"));
  assert!(b.borrow().content_type("FromA").is_none());

  store.save(&a.borrow()).unwrap();
  store.save(&b.borrow()).unwrap();

  let (_, stored) = store.get_for_read(&ScopedCache::new()).unwrap();
  let stored = stored.borrow();
  assert!(stored.content_type("FromA").is_none());
  assert!(stored.content_type("FromB").is_some());
}

#[test]
fn scopes_on_different_threads_are_isolated() {
  let (_temp, store) = temp_tenant_store();
  store.save(&record_with_types(&["Shared"])).unwrap();

  let handles: Vec<_> = (0..4)
    .map(|i| {
      let store = Arc::clone(&store);
      thread::spawn(move || {
        let mut scope = ScopedCache::new();
        let record = store.load_for_mutation(&mut scope).unwrap();
        record
          .borrow_mut()
          .upsert_content_type(ContentTypeDefinitionRecord::new(format!("Thread{i}")));

        let (_, read) = store.get_for_read(&scope).unwrap();
        let names: Vec<String> = read
          .borrow()
          .content_type_definition_records
          .iter()
          .map(|t| t.name.clone())
          .collect();
        names
      })
    })
    .collect();

  for (i, handle) in handles.into_iter().enumerate() {
    assert_eq!(handle.join().unwrap(), vec!["Shared".to_string(), format!("Thread{i}")]);
  }
}
