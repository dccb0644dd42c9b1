//! Family service
//!
//! Owns the registry for one database file: opens it, applies imports and
//! mutations, and saves it back only when something changed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, JsonResultExt};
use crate::domain::{Family, FamilyRecord, ImportOptions, MemberId, NestedMember, TreeImporter};
use crate::infrastructure::traits::FileSystem;

/// King Arthur's family, shipped with the binary.
pub const BUNDLED_TREE: &str = include_str!("../../../resources/arthur.json");

/// Service wrapping a [`Family`] and the database file it lives in.
pub struct FamilyService {
    fs: Arc<dyn FileSystem>,
    db_path: PathBuf,
    importer: TreeImporter,
    family: Family,
    needs_save: bool,
}

impl FamilyService {
    /// Create a service over an empty registry.
    pub fn new(fs: Arc<dyn FileSystem>, db_path: impl Into<PathBuf>, options: ImportOptions) -> Self {
        Self {
            fs,
            db_path: db_path.into(),
            importer: TreeImporter::new(options),
            family: Family::new(),
            needs_save: false,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    /// Whether the registry changed since it was opened or saved.
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Load the database file, if there is one, into a fresh registry.
    ///
    /// A malformed file is reported and leaves the current registry as is.
    #[instrument(level = "debug", skip(self))]
    pub fn open(&mut self) -> ApplicationResult<()> {
        if !self.fs.exists(&self.db_path) {
            debug!("open: no database at {}", self.db_path.display());
            return Ok(());
        }
        let content = self
            .fs
            .read_to_string(&self.db_path)
            .with_path_context("read family database", &self.db_path)?;
        let record: FamilyRecord = serde_json::from_str(&content)
            .malformed_record(&self.db_path)
            .inspect_err(|e| error!("open: abandoning load: {}", e))?;

        let mut family = Family::new();
        family.load_record(&record);
        info!("open: loaded {} members from {}", family.len(), self.db_path.display());
        self.family = family;
        self.needs_save = false;
        Ok(())
    }

    /// Write the registry to the database file.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&mut self) -> ApplicationResult<()> {
        let record = self.family.to_record();
        let content = serde_json::to_string_pretty(&record).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize family record".to_string(),
            source: Box::new(e),
        })?;
        self.fs
            .ensure_parent(&self.db_path)
            .with_path_context("create database directory", &self.db_path)?;
        self.fs
            .write(&self.db_path, &content)
            .with_path_context("write family database", &self.db_path)?;
        info!("save: wrote {} members to {}", record.members.len(), self.db_path.display());
        self.needs_save = false;
        Ok(())
    }

    /// Save only if the registry changed. Returns whether it wrote.
    pub fn save_if_needed(&mut self) -> ApplicationResult<bool> {
        if !self.needs_save {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Drop every member.
    pub fn clean(&mut self) {
        self.family.clean();
        self.needs_save = true;
    }

    /// Import a nested-tree JSON document.
    #[instrument(level = "debug", skip(self, json))]
    pub fn import_tree(&mut self, json: &str) -> ApplicationResult<Option<MemberId>> {
        let tree: NestedMember = serde_json::from_str(json).malformed_tree()?;
        let imported = self.importer.import(&mut self.family, &tree)?;
        self.needs_save = true;
        Ok(imported)
    }

    /// Import a nested-tree document from a file.
    pub fn import_file(&mut self, path: &Path) -> ApplicationResult<Option<MemberId>> {
        let json = self
            .fs
            .read_to_string(path)
            .with_path_context("read family tree", path)?;
        self.import_tree(&json)
    }

    /// Import the bundled king Arthur family.
    pub fn import_bundled(&mut self) -> ApplicationResult<Option<MemberId>> {
        self.import_tree(BUNDLED_TREE)
    }

    /// Add a child through its mother, see [`Family::add_child`].
    pub fn add_child(&mut self, mother: &str, name: &str, gender: &str) -> ApplicationResult<MemberId> {
        let child = self.family.add_child(mother, name, gender)?;
        self.needs_save = true;
        Ok(child)
    }

    /// Names related to `person` by `relation`, see [`Family::get_relationship`].
    pub fn get_relationship(&self, person: &str, relation: &str) -> ApplicationResult<Vec<String>> {
        Ok(self.family.get_relationship(person, relation)?)
    }
}
