//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::FamilyService;
use crate::config::Settings;
use crate::domain::ImportOptions;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and the I/O implementations services need.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Family service over the configured database.
    pub fn family_service(&self) -> FamilyService {
        FamilyService::new(
            Arc::clone(&self.fs),
            self.settings.db_path(),
            ImportOptions {
                root_age: self.settings.root_age,
                ..ImportOptions::default()
            },
        )
    }
}
