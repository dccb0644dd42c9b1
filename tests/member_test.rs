//! Tests for member-level mutations: marriage and child attachment

use rstest::rstest;

use famtree::domain::{DomainError, Family, Gender, Member, MemberId};
use famtree::util::testing;

fn member(family: &mut Family, name: &str, gender: Gender) -> MemberId {
    family.register(Member::new(name, gender, None))
}

#[rstest]
#[case(Gender::Male)]
#[case(Gender::Female)]
fn given_unmarried_parent_when_attaching_child_then_no_spouse(#[case] gender: Gender) {
    // Arrange
    testing::init_test_setup();
    let mut family = Family::new();
    let parent = member(&mut family, "Charlie", gender);
    let child = member(&mut family, "Kid", Gender::Female);

    // Act
    let result = family.attach_child(parent, child);

    // Assert
    assert_eq!(
        result,
        Err(DomainError::NoSpouse {
            member: "Charlie".into()
        })
    );
    assert!(family.get(parent).unwrap().children().is_empty());
    assert!(family.get(child).unwrap().mother().is_none());
    assert!(family.get(child).unwrap().father().is_none());
}

#[test]
fn given_child_of_other_couple_when_unmarried_member_attaches_then_no_spouse() {
    // Arrange
    let mut family = Family::new();
    let arthur = member(&mut family, "Arthur", Gender::Male);
    let margret = member(&mut family, "Margret", Gender::Female);
    let bill = member(&mut family, "Bill", Gender::Male);
    family.add_spouse(arthur, margret).unwrap();
    family.attach_child(arthur, bill).unwrap();
    let lonely = member(&mut family, "Lonely", Gender::Female);

    // Act
    let err = family.attach_child(lonely, bill).unwrap_err();

    // Assert
    assert_eq!(err.short(), "MEMBER_HAS_NO_SPOUSE");
}

#[rstest]
#[case(Gender::Male)]
#[case(Gender::Female)]
fn given_same_gender_when_marrying_then_rejected(#[case] gender: Gender) {
    // Arrange
    let mut family = Family::new();
    let a = member(&mut family, "A", gender);
    let b = member(&mut family, "B", gender);

    // Act
    let err = family.add_spouse(a, b).unwrap_err();

    // Assert
    assert_eq!(err.short(), "NO_SAME_SEX_MARRIAGE");
    assert!(family.get(a).unwrap().spouse().is_none());
    assert!(family.get(b).unwrap().spouse().is_none());
}

#[test]
fn given_opposite_genders_when_marrying_then_relation_is_symmetric() {
    // Arrange
    let mut family = Family::new();
    let arthur = member(&mut family, "Arthur", Gender::Male);
    let margret = member(&mut family, "Margret", Gender::Female);

    // Act
    family.add_spouse(margret, arthur).unwrap();

    // Assert
    assert_eq!(family.get(arthur).unwrap().spouse(), Some(margret));
    assert_eq!(family.get(margret).unwrap().spouse(), Some(arthur));
}

#[rstest]
#[case::through_mother(false)]
#[case::through_father(true)]
fn given_married_parent_when_attaching_child_then_both_parents_linked(#[case] via_father: bool) {
    // Arrange
    let mut family = Family::new();
    let arthur = member(&mut family, "Arthur", Gender::Male);
    let margret = member(&mut family, "Margret", Gender::Female);
    let flora = member(&mut family, "Flora", Gender::Female);
    family.add_spouse(arthur, margret).unwrap();

    // Act
    let acting = if via_father { arthur } else { margret };
    family.attach_child(acting, flora).unwrap();

    // Assert
    let child = family.get(flora).unwrap();
    assert_eq!(child.mother(), Some(margret));
    assert_eq!(child.father(), Some(arthur));
    assert_eq!(family.get(arthur).unwrap().children(), &[flora]);
    assert_eq!(family.get(margret).unwrap().children(), &[flora]);
}

#[test]
fn given_children_when_attaching_then_insertion_order_kept() {
    // Arrange
    let mut family = Family::new();
    let arthur = member(&mut family, "Arthur", Gender::Male);
    let margret = member(&mut family, "Margret", Gender::Female);
    family.add_spouse(arthur, margret).unwrap();
    let kids: Vec<MemberId> = ["Bill", "Charlie", "Percy"]
        .iter()
        .map(|name| member(&mut family, name, Gender::Male))
        .collect();

    // Act
    for &kid in kids.iter().rev() {
        family.attach_child(margret, kid).unwrap();
    }

    // Assert
    let expected: Vec<MemberId> = kids.iter().rev().copied().collect();
    assert_eq!(family.get(margret).unwrap().children(), expected.as_slice());
    assert_eq!(family.get(arthur).unwrap().children(), expected.as_slice());
}

/// Remarriage is not modeled: the previous spouse keeps its link.
#[test]
fn given_married_member_when_marrying_again_then_old_spouse_link_dangles() {
    // Arrange
    let mut family = Family::new();
    let arthur = member(&mut family, "Arthur", Gender::Male);
    let margret = member(&mut family, "Margret", Gender::Female);
    let morgana = member(&mut family, "Morgana", Gender::Female);
    family.add_spouse(arthur, margret).unwrap();

    // Act
    family.add_spouse(arthur, morgana).unwrap();

    // Assert
    assert_eq!(family.get(arthur).unwrap().spouse(), Some(morgana));
    assert_eq!(family.get(morgana).unwrap().spouse(), Some(arthur));
    assert_eq!(family.get(margret).unwrap().spouse(), Some(arthur));
}
