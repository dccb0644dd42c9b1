//! Tests for derived relationships

mod common;

use chrono::{TimeZone, Utc};
use rstest::rstest;

use common::{arthur_family, names};
use famtree::domain::relations::{brothers, descendants, sister_in_law, sisters, siblings};
use famtree::domain::{Family, Gender, Member, MemberId};

fn id(family: &Family, name: &str) -> MemberId {
    family.find_by_name(name).unwrap_or_else(|| panic!("{name} is registered"))
}

#[rstest]
#[case("Dominique", "Siblings", &["Victoire", "Louis"])]
#[case("Remus", "Siblings", &[])]
#[case("Lily", "Siblings", &["James", "Albus"])]
#[case("Arthur", "Siblings", &[])]
#[case("Remus", "Maternal-Aunt", &["Dominique"])]
#[case("Ron", "Maternal-Aunt", &[])]
#[case("Draco", "Maternal-Aunt", &[])]
#[case("Flora", "Sister-In-Law", &["Ginerva"])]
#[case("Bill", "Sister-In-Law", &["Audrey", "Helen"])]
#[case("Ginerva", "Sister-In-Law", &["Flora", "Audrey", "Helen"])]
#[case("Harry", "Sister-In-Law", &[])]
fn given_arthur_family_when_querying_then_ordered_by_birth(
    #[case] person: &str,
    #[case] relation: &str,
    #[case] expected: &[&str],
) {
    // Arrange
    let family = arthur_family();

    // Act
    let result = family.get_relationship(person, relation).unwrap();

    // Assert
    assert_eq!(result, names(expected));
}

#[test]
fn given_minerva_added_to_flora_when_querying_dominique_siblings_then_minerva_last() {
    // Arrange
    let mut family = arthur_family();
    family.add_child("Flora", "Minerva", "Female").unwrap();

    // Act
    let result = family.get_relationship("Dominique", "Siblings").unwrap();

    // Assert
    assert_eq!(result, names(&["Victoire", "Louis", "Minerva"]));
}

#[test]
fn given_minerva_added_to_flora_when_querying_remus_maternal_aunt_then_both_aunts() {
    // Arrange
    let mut family = arthur_family();
    family.add_child("Flora", "Minerva", "Female").unwrap();

    // Act
    let result = family.get_relationship("Remus", "Maternal-Aunt").unwrap();

    // Assert
    assert_eq!(result, names(&["Dominique", "Minerva"]));
}

#[test]
fn given_mixed_siblings_when_filtering_then_split_by_gender() {
    // Arrange
    let family = arthur_family();
    let bill = id(&family, "Bill");

    // Act
    let brothers = family.names(&brothers(&family, bill));
    let sisters = family.names(&sisters(&family, bill));

    // Assert
    assert_eq!(brothers, names(&["Charlie", "Percy", "Ronald"]));
    assert_eq!(sisters, names(&["Ginerva"]));
}

#[test]
fn given_children_out_of_birth_order_when_deriving_siblings_then_sorted() {
    // Arrange: the youngest child is attached first
    let mut family = Family::new();
    let date = |year| Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap());
    let dad = family.register(Member::new("Dad", Gender::Male, date(1950)));
    let mom = family.register(Member::new("Mom", Gender::Female, date(1950)));
    family.add_spouse(dad, mom).unwrap();
    for (name, year) in [("Young", 1990), ("Old", 1980), ("Me", 1985), ("Twin", 1980)] {
        let kid = family.register(Member::new(name, Gender::Female, date(year)));
        family.attach_child(mom, kid).unwrap();
    }

    // Act
    let result = family.names(&siblings(&family, id(&family, "Me")));

    // Assert: equal birth dates keep attachment order
    assert_eq!(result, names(&["Old", "Twin", "Young"]));
}

#[test]
fn given_unmarried_brother_when_sister_in_law_then_only_wives_of_married_brothers() {
    // Arrange
    let family = arthur_family();
    let percy = id(&family, "Percy");

    // Act
    let result = family.names(&sister_in_law(&family, percy));

    // Assert: Charlie has no wife and Audrey has no sisters
    assert_eq!(result, names(&["Flora", "Helen"]));
}

#[test]
fn given_arthur_family_when_descendants_then_whole_subtree_by_birth() {
    // Arrange
    let family = arthur_family();

    // Act
    let result = family.names(&descendants(&family, id(&family, "Ronald")));

    // Assert
    assert_eq!(result, names(&["Rose", "Hugo", "Draco", "Aster"]));
}

/// With equal birth dates the sort keeps the fold order:
/// each child's descendants first, then the children themselves.
#[test]
fn given_equal_birth_dates_when_descendants_then_fold_order_is_kept() {
    // Arrange
    let same = Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    let mut family = Family::new();
    let add = |family: &mut Family, name: &str, gender| family.register(Member::new(name, gender, same));
    let p = add(&mut family, "P", Gender::Male);
    let s = add(&mut family, "S", Gender::Female);
    let c1 = add(&mut family, "C1", Gender::Male);
    let w1 = add(&mut family, "W1", Gender::Female);
    let c2 = add(&mut family, "C2", Gender::Female);
    let h2 = add(&mut family, "H2", Gender::Male);
    let g1 = add(&mut family, "G1", Gender::Male);
    let g2 = add(&mut family, "G2", Gender::Female);
    let gg = add(&mut family, "GG", Gender::Female);
    let gw = add(&mut family, "GW", Gender::Female);
    family.add_spouse(p, s).unwrap();
    family.add_spouse(c1, w1).unwrap();
    family.add_spouse(c2, h2).unwrap();
    family.add_spouse(g1, gw).unwrap();
    family.attach_child(p, c1).unwrap();
    family.attach_child(p, c2).unwrap();
    family.attach_child(c1, g1).unwrap();
    family.attach_child(c2, g2).unwrap();
    family.attach_child(g1, gg).unwrap();

    // Act
    let result = family.names(&descendants(&family, p));

    // Assert: D(C1) = [GG, G1], D(C2) = [G2], then [C1, C2]
    assert_eq!(result, names(&["GG", "G1", "G2", "C1", "C2"]));
}

#[test]
fn given_childless_member_when_descendants_then_empty() {
    let family = arthur_family();
    assert!(descendants(&family, id(&family, "Charlie")).is_empty());
}
