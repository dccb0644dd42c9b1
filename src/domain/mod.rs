//! Domain layer: the family graph and its rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod codec;
pub mod entities;
pub mod error;
pub mod family;
pub mod relations;

pub use builder::{ImportOptions, TreeImporter, DEFAULT_ROOT_AGE};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use family::{Family, GENERATION_GAP_YEARS, SIBLING_GAP_YEARS};
pub use relations::RelationType;
