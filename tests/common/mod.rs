//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use famtree::application::services::BUNDLED_TREE;
use famtree::domain::{Family, NestedMember, TreeImporter};
use famtree::util::testing;

/// Fixed "now" so inferred birth dates are predictable.
pub fn import_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap()
}

/// King Arthur's family imported at [`import_now`].
///
/// Inferred birth years: Arthur and Margret 1670, their children from 1700
/// (Bill) to 1704 (Ginerva), Bill's children Victoire 1730, Dominique 1731,
/// Louis 1732, and Remus 1760.
pub fn arthur_family() -> Family {
    testing::init_test_setup();
    let tree: NestedMember = serde_json::from_str(BUNDLED_TREE).expect("bundled tree parses");
    let mut family = Family::new();
    TreeImporter::default()
        .import_at(&mut family, &tree, import_now())
        .expect("bundled tree imports");
    family
}

/// Shorthand for a list of owned names.
pub fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}
