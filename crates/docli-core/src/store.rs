//! Document metadata repository
//!
//! The `SpecStore` exposes CRUD over the documentation configuration and
//! keeps the two on-disk representations in step:
//! - `spec.json` (source of truth)
//! - `spec.md` (Markdown mirror, re-rendered on every mutation)
//!
//! Every mutating call loads the canonical file, applies the change in
//! memory, then writes the canonical file and the mirror. The store never
//! prints. It returns typed results and leaves reporting to its callers.
//!
//! ## Usage
//!
//! ```ignore
//! let store = SpecStore::open()?;
//! store.initialize(["confluence"])?;
//!
//! let doc = store.new_doc_meta("README", None, vec!["README.md".into()])?;
//! store.add_doc_meta(doc)?;
//!
//! let docs = store.list_doc_meta()?;
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::id;
use crate::models::{DocMeta, DocSpec};
use crate::storage::{SpecPersistence, StorageError, StorageResult};

/// Repository for the documentation configuration
pub struct SpecStore {
    persistence: SpecPersistence,
}

impl SpecStore {
    /// Open the store using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(Self::with_config(config))
    }

    /// Open the store with a specific configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            persistence: SpecPersistence::new(config),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    /// Check whether a configuration exists
    ///
    /// Path check on the canonical file only.
    pub fn exists(&self) -> bool {
        self.persistence.exists()
    }

    /// Create a new configuration targeting `platforms`
    ///
    /// Duplicate platforms are collapsed in first-seen order. Fails with
    /// `AlreadyExists` if a configuration is present, leaving it untouched.
    pub fn initialize<I, S>(&self, platforms: I) -> StorageResult<DocSpec>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.exists() {
            return Err(StorageError::AlreadyExists {
                path: self.config().spec_json_path(),
            });
        }

        let spec = DocSpec::new(platforms);
        self.persistence.save(&spec)?;
        info!(
            "Initialized configuration in {:?} with platforms {:?}",
            self.config().docs_dir,
            spec.platforms
        );
        Ok(spec)
    }

    /// Load the whole configuration
    pub fn load(&self) -> StorageResult<DocSpec> {
        self.ensure_initialized()?;
        self.persistence.load()
    }

    /// Build a new document entry with an ID unused by the current set
    pub fn new_doc_meta(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        file_hints: Vec<String>,
    ) -> StorageResult<DocMeta> {
        let spec = self.load()?;
        let id = id::generate_unique(|candidate| spec.contains_id(candidate));
        Ok(DocMeta::with_id(id, name, description, file_hints))
    }

    /// Build and append a document entry in a single load and save
    ///
    /// The ID is generated against the set being written, so it cannot
    /// collide. Returns the stored entry.
    pub fn create_doc_meta(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        file_hints: Vec<String>,
    ) -> StorageResult<DocMeta> {
        let name = name.into();
        self.mutate(|spec| {
            let id = id::generate_unique(|candidate| spec.contains_id(candidate));
            let doc = DocMeta::with_id(id, name, description, file_hints);
            validate_doc_meta(&doc)?;
            info!("Adding document '{}' ({})", doc.name, doc.id);
            spec.docmeta.push(doc.clone());
            Ok(doc)
        })
    }

    /// Append a document entry
    ///
    /// The entry must already carry its ID. Empty names and IDs already in
    /// use are rejected.
    pub fn add_doc_meta(&self, mut doc: DocMeta) -> StorageResult<()> {
        validate_doc_meta(&doc)?;
        doc.description = doc.description.filter(|d| !d.is_empty());

        self.mutate(|spec| {
            if spec.contains_id(&doc.id) {
                return Err(StorageError::DuplicateId { id: doc.id.clone() });
            }
            info!("Adding document '{}' ({})", doc.name, doc.id);
            spec.docmeta.push(doc);
            Ok(())
        })
    }

    /// Remove the document entry with the given ID
    ///
    /// Returns the removed entry. Fails with `DocMetaNotFound` if no entry
    /// matches, in which case nothing is written.
    pub fn remove_doc_meta(&self, id: &str) -> StorageResult<DocMeta> {
        self.mutate(|spec| {
            let removed = spec
                .remove_doc_meta(id)
                .ok_or_else(|| StorageError::DocMetaNotFound { id: id.to_string() })?;
            info!("Removed document '{}' ({})", removed.name, removed.id);
            Ok(removed)
        })
    }

    /// All document entries in stored order
    pub fn list_doc_meta(&self) -> StorageResult<Vec<DocMeta>> {
        Ok(self.load()?.docmeta)
    }

    /// Look up a document entry by ID
    pub fn get_doc_meta(&self, id: &str) -> StorageResult<Option<DocMeta>> {
        Ok(self.load()?.get_doc_meta(id).cloned())
    }

    /// Configured platforms in selection order
    pub fn platforms(&self) -> StorageResult<Vec<String>> {
        Ok(self.load()?.platforms)
    }

    /// Add a platform
    ///
    /// Returns false, without writing anything, if it is already configured.
    pub fn add_platform(&self, platform: &str) -> StorageResult<bool> {
        let mut spec = self.load()?;
        if !spec.add_platform(platform) {
            return Ok(false);
        }
        self.persistence.save(&spec)?;
        info!("Added platform '{}'", platform);
        Ok(true)
    }

    /// Remove a platform
    pub fn remove_platform(&self, platform: &str) -> StorageResult<()> {
        self.mutate(|spec| {
            if !spec.remove_platform(platform) {
                return Err(StorageError::PlatformNotFound {
                    platform: platform.to_string(),
                });
            }
            info!("Removed platform '{}'", platform);
            Ok(())
        })
    }

    /// Regenerate the Markdown mirror from the canonical file
    ///
    /// Repairs a missing or stale `spec.md`. The canonical file is not
    /// rewritten.
    pub fn render(&self) -> StorageResult<()> {
        let spec = self.load()?;
        self.persistence.save_mirror(&spec)?;
        info!("Rendered {:?}", self.config().spec_md_path());
        Ok(())
    }

    /// Load, apply `f`, and save both files if `f` succeeds
    fn mutate<T>(&self, f: impl FnOnce(&mut DocSpec) -> StorageResult<T>) -> StorageResult<T> {
        let mut spec = self.load()?;
        let value = f(&mut spec)?;
        self.persistence.save(&spec)?;
        Ok(value)
    }

    fn ensure_initialized(&self) -> StorageResult<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(StorageError::NotInitialized {
                path: self.config().spec_json_path(),
            })
        }
    }
}

fn validate_doc_meta(doc: &DocMeta) -> StorageResult<()> {
    if doc.name.trim().is_empty() {
        return Err(StorageError::InvalidDocMeta {
            reason: "name must not be empty".to_string(),
        });
    }
    if doc.id.is_empty() {
        return Err(StorageError::InvalidDocMeta {
            reason: "ID must be assigned before adding".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorKind;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            docs_dir: temp_dir.path().join(".docs"),
            log_file: None,
        }
    }

    fn test_store(temp_dir: &TempDir) -> SpecStore {
        SpecStore::with_config(test_config(temp_dir))
    }

    fn read_json(store: &SpecStore) -> serde_json::Value {
        let content = fs::read_to_string(store.config().spec_json_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    fn read_mirror(store: &SpecStore) -> String {
        fs::read_to_string(store.config().spec_md_path()).unwrap()
    }

    fn doc(id: &str, name: &str) -> DocMeta {
        DocMeta::with_id(id, name, None, vec![])
    }

    #[test]
    fn test_initialize() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        assert!(!store.exists());
        store.initialize(["confluence"]).unwrap();
        assert!(store.exists());

        assert_eq!(
            read_json(&store),
            json!({"platforms": ["confluence"], "docmeta": []})
        );

        let mirror = read_mirror(&store);
        assert!(mirror.contains("## Platforms"));
        assert!(mirror.contains("- Confluence"));
        assert!(mirror.contains("## Documents\n\nNo documents configured yet, nothing to do."));
    }

    #[test]
    fn test_initialize_dedupes_platforms() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store
            .initialize(["readme", "confluence", "readme", "confluence"])
            .unwrap();

        assert_eq!(
            read_json(&store)["platforms"],
            json!(["readme", "confluence"])
        );
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store.initialize(["confluence"]).unwrap();
        store.add_doc_meta(doc("a", "README")).unwrap();
        let before_json = read_json(&store);
        let before_mirror = read_mirror(&store);

        let err = store.initialize(["readme"]).unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));
        assert_eq!(err.kind(), StorageErrorKind::AlreadyExists);

        assert_eq!(read_json(&store), before_json);
        assert_eq!(read_mirror(&store), before_mirror);
    }

    #[test]
    fn test_operations_require_initialization() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let errors = [
            store.add_doc_meta(doc("a", "README")).unwrap_err(),
            store.remove_doc_meta("a").unwrap_err(),
            store.list_doc_meta().unwrap_err(),
            store.add_platform("readme").unwrap_err(),
            store.remove_platform("readme").unwrap_err(),
            store.render().unwrap_err(),
            store.new_doc_meta("README", None, vec![]).unwrap_err(),
        ];

        for err in errors {
            assert_eq!(err.kind(), StorageErrorKind::NotInitialized, "{}", err);
        }
        assert!(!store.config().docs_dir.exists());
    }

    #[test]
    fn test_add_doc_meta_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        store.add_doc_meta(doc("a", "First")).unwrap();
        store.add_doc_meta(doc("b", "Second")).unwrap();
        let before = store.list_doc_meta().unwrap();

        let new_doc = DocMeta::with_id(
            "c",
            "Third",
            Some("Last one".to_string()),
            vec!["docs/".to_string()],
        );
        store.add_doc_meta(new_doc.clone()).unwrap();

        let after = store.list_doc_meta().unwrap();
        assert_eq!(after.len(), 3);
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(after.last(), Some(&new_doc));
    }

    #[test]
    fn test_add_readme_document() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let readme = store
            .new_doc_meta("README", Some(String::new()), vec!["README.md".to_string()])
            .unwrap();
        store.add_doc_meta(readme).unwrap();

        let docs = store.list_doc_meta().unwrap();
        assert_eq!(docs.len(), 1);
        assert!(!docs[0].id.is_empty());
        assert_eq!(docs[0].name, "README");
        assert_eq!(docs[0].file_hints, vec!["README.md"]);

        let json = read_json(&store);
        let stored = &json["docmeta"][0];
        assert!(stored.get("description").is_none());
        assert_eq!(stored["id"], json!(docs[0].id));
        assert_eq!(stored["file_hints"], json!(["README.md"]));

        let mirror = read_mirror(&store);
        assert!(mirror.contains("### 1. README\n\n**File/Folder Sources:**\n- `README.md`\n\n"));
        assert!(!mirror.contains("**Description:**"));
    }

    #[test]
    fn test_add_doc_meta_rejects_duplicate_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        store.add_doc_meta(doc("a", "First")).unwrap();
        let err = store.add_doc_meta(doc("a", "Again")).unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId { .. }));
        assert_eq!(store.list_doc_meta().unwrap().len(), 1);
    }

    #[test]
    fn test_add_doc_meta_rejects_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let err = store.add_doc_meta(doc("a", "  ")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocMeta { .. }));

        let err = store.add_doc_meta(doc("", "README")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocMeta { .. }));

        assert!(store.list_doc_meta().unwrap().is_empty());
    }

    #[test]
    fn test_new_doc_meta_ids_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        for i in 0..20 {
            let d = store.new_doc_meta(format!("Doc {}", i), None, vec![]).unwrap();
            store.add_doc_meta(d).unwrap();
        }

        let mut ids: Vec<_> = store
            .list_doc_meta()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_remove_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        store.add_doc_meta(doc("a", "README")).unwrap();
        let before = store.list_doc_meta().unwrap();

        let err = store.remove_doc_meta("missing").unwrap_err();
        assert!(matches!(err, StorageError::DocMetaNotFound { ref id } if id == "missing"));
        assert_eq!(err.kind(), StorageErrorKind::NotFound);

        assert_eq!(store.list_doc_meta().unwrap(), before);
    }

    #[test]
    fn test_add_then_remove_restores_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        store.add_doc_meta(doc("a", "First")).unwrap();
        store.add_doc_meta(doc("b", "Second")).unwrap();
        let before = store.list_doc_meta().unwrap();

        store.add_doc_meta(doc("c", "Third")).unwrap();
        let removed = store.remove_doc_meta("c").unwrap();

        assert_eq!(removed.name, "Third");
        assert_eq!(store.list_doc_meta().unwrap(), before);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        for (id, name) in [("a", "One"), ("b", "Two"), ("c", "Three")] {
            store.add_doc_meta(doc(id, name)).unwrap();
        }

        store.remove_doc_meta("b").unwrap();

        let names: Vec<_> = store
            .list_doc_meta()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["One", "Three"]);

        let mirror = read_mirror(&store);
        assert!(mirror.contains("### 1. One"));
        assert!(mirror.contains("### 2. Three"));
        assert!(!mirror.contains("Two"));
    }

    #[test]
    fn test_remove_only_document_resets_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let readme = store
            .new_doc_meta("README", None, vec!["README.md".to_string()])
            .unwrap();
        let id = readme.id.clone();
        store.add_doc_meta(readme).unwrap();
        assert!(read_mirror(&store).contains("### 1. README"));

        store.remove_doc_meta(&id).unwrap();

        assert!(store.list_doc_meta().unwrap().is_empty());
        assert!(read_mirror(&store).contains("No documents configured yet, nothing to do."));
        assert_eq!(read_json(&store)["docmeta"], json!([]));
    }

    #[test]
    fn test_get_doc_meta() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        store.add_doc_meta(doc("a", "README")).unwrap();

        assert_eq!(store.get_doc_meta("a").unwrap().unwrap().name, "README");
        assert!(store.get_doc_meta("b").unwrap().is_none());
    }

    #[test]
    fn test_platforms() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        assert!(store.add_platform("readme").unwrap());
        assert!(!store.add_platform("readme").unwrap());
        assert_eq!(store.platforms().unwrap(), vec!["confluence", "readme"]);
        assert!(read_mirror(&store).contains("- Confluence\n- Readme\n"));

        store.remove_platform("confluence").unwrap();
        assert_eq!(store.platforms().unwrap(), vec!["readme"]);
        assert!(!read_mirror(&store).contains("Confluence"));

        let err = store.remove_platform("confluence").unwrap_err();
        assert!(matches!(err, StorageError::PlatformNotFound { .. }));
    }

    #[test]
    fn test_remove_last_platform() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["readme"]).unwrap();

        store.remove_platform("readme").unwrap();

        assert_eq!(read_json(&store)["platforms"], json!([]));
        assert!(read_mirror(&store).contains("No platforms configured."));
    }

    #[test]
    fn test_render_repairs_missing_mirror() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        store.add_doc_meta(doc("a", "README")).unwrap();
        let expected = read_mirror(&store);

        fs::remove_file(store.config().spec_md_path()).unwrap();
        store.render().unwrap();

        assert_eq!(read_mirror(&store), expected);
    }

    #[test]
    fn test_malformed_canonical_file_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let path = store.config().spec_json_path();
        fs::write(&path, "{\"platforms\": [").unwrap();

        let err = store.add_doc_meta(doc("a", "README")).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::LoadError);
        assert!(!err.is_recoverable());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"platforms\": [");
    }

    #[test]
    fn test_create_doc_meta() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let created = store
            .create_doc_meta("README", Some(String::new()), vec!["README.md".into()])
            .unwrap();

        assert!(!created.id.is_empty());
        assert!(created.description.is_none());
        assert_eq!(store.list_doc_meta().unwrap(), vec![created]);
        assert!(read_mirror(&store).contains("### 1. README"));
    }

    #[test]
    fn test_create_doc_meta_rejects_blank_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let err = store.create_doc_meta("  ", None, vec![]).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Invalid);
        assert!(store.list_doc_meta().unwrap().is_empty());
    }

    #[test]
    fn test_empty_description_is_never_written() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        store
            .add_doc_meta(DocMeta {
                id: "a".to_string(),
                name: "README".to_string(),
                description: Some(String::new()),
                file_hints: vec![],
            })
            .unwrap();

        let content = fs::read_to_string(store.config().spec_json_path()).unwrap();
        assert!(!content.contains("description"));
        assert!(store.list_doc_meta().unwrap()[0].description.is_none());
    }

    #[test]
    fn test_empty_description_in_file_is_dropped_on_next_save() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        fs::create_dir_all(&store.config().docs_dir).unwrap();
        fs::write(
            store.config().spec_json_path(),
            r#"{"docmeta":[{"id":"a","name":"X","description":""}]}"#,
        )
        .unwrap();

        assert!(store.add_platform("readme").unwrap());

        let content = fs::read_to_string(store.config().spec_json_path()).unwrap();
        assert!(!content.contains("description"));
        assert_eq!(read_json(&store)["docmeta"][0]["name"], "X");
    }

    #[test]
    fn test_failed_canonical_write_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();
        let mirror_before = read_mirror(&store);

        // A directory in the way of the temp file makes the write fail
        fs::create_dir(store.config().docs_dir.join("spec.json.tmp")).unwrap();

        let err = store.add_doc_meta(doc("a", "README")).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::WriteError);
        assert!(!err.is_recoverable());

        assert!(store.list_doc_meta().unwrap().is_empty());
        assert_eq!(read_mirror(&store), mirror_before);
    }

    #[test]
    fn test_failed_mirror_write_keeps_canonical_state() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store.initialize(["confluence"]).unwrap();

        let blocker = store.config().docs_dir.join("spec.md.tmp");
        fs::create_dir(&blocker).unwrap();

        let err = store.add_doc_meta(doc("a", "README")).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::WriteError);

        // Canonical file already holds the new entry, the mirror is stale
        assert_eq!(read_json(&store)["docmeta"][0]["id"], "a");
        assert!(read_mirror(&store).contains("No documents configured yet"));

        fs::remove_dir(&blocker).unwrap();
        store.render().unwrap();
        assert!(read_mirror(&store).contains("### 1. README"));
    }

    #[test]
    fn test_state_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let store1 = SpecStore::with_config(config.clone());
        store1.initialize(["readme"]).unwrap();
        store1.add_doc_meta(doc("a", "README")).unwrap();

        let store2 = SpecStore::with_config(config);
        assert!(store2.exists());
        assert_eq!(store2.list_doc_meta().unwrap(), vec![doc("a", "README")]);
        assert_eq!(store2.platforms().unwrap(), vec!["readme"]);
    }
}
