//! `map_err` shorthands used by the services.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the failed action and the file it touched to an I/O error.
pub trait IoResultExt<T> {
    /// ```ignore
    /// fs.read_to_string(&db_path)
    ///     .with_path_context("read family database", &db_path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action}: {}", path.display()),
            source: Box::new(e),
        })
    }
}

/// Turn a JSON decoding failure into the error for the document kind.
pub trait JsonResultExt<T> {
    /// The flat database file at `path` did not decode.
    fn malformed_record(self, path: &Path) -> ApplicationResult<T>;

    /// A nested-tree document did not decode.
    fn malformed_tree(self) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn malformed_record(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::MalformedRecord {
            path: path.to_path_buf(),
            source,
        })
    }

    fn malformed_tree(self) -> ApplicationResult<T> {
        self.map_err(ApplicationError::MalformedTree)
    }
}
