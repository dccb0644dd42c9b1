//! Genealogical family tree.
//!
//! Members live in an arena-backed [`domain::Family`] registry and are linked
//! by father, mother, spouse and children handles. Relationships such as
//! siblings or sisters-in-law are derived on demand. A family is populated
//! either from a nested-tree document ([`domain::TreeImporter`]) or from its
//! flat, name-referenced record ([`domain::Family::load_record`]).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
