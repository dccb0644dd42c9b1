//! Derived relationships computed from father, mother, spouse and children edges.
//!
//! Every derivation ends with [`sort_by_birth`]: ascending birth date,
//! equal dates keep their relative order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::domain::entities::{Gender, MemberId};
use crate::domain::error::DomainError;
use crate::domain::family::Family;

/// Derivation signature shared by every relation.
pub type Derivation = fn(&Family, MemberId) -> Vec<MemberId>;

/// Relations that can be queried by name through [`Family::get_relationship`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    Siblings,
    MaternalAunt,
    SisterInLaw,
}

impl RelationType {
    pub const ALL: [RelationType; 3] = [
        RelationType::Siblings,
        RelationType::MaternalAunt,
        RelationType::SisterInLaw,
    ];

    /// External name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Siblings => "Siblings",
            RelationType::MaternalAunt => "Maternal-Aunt",
            RelationType::SisterInLaw => "Sister-In-Law",
        }
    }

    pub fn derivation(&self) -> Derivation {
        match self {
            RelationType::Siblings => siblings,
            RelationType::MaternalAunt => maternal_aunt,
            RelationType::SisterInLaw => sister_in_law,
        }
    }

    pub fn derive(&self, family: &Family, member: MemberId) -> Vec<MemberId> {
        (self.derivation())(family, member)
    }
}

impl FromStr for RelationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationType::ALL
            .into_iter()
            .find(|relation| relation.as_str() == s)
            .ok_or_else(|| DomainError::RelationshipNotFound(s.to_string()))
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable sort by ascending birth date. Dead handles sort last.
pub fn sort_by_birth(family: &Family, members: Vec<MemberId>) -> Vec<MemberId> {
    members
        .into_iter()
        .sorted_by_key(|&id| {
            family
                .get(id)
                .map(|m| (false, m.birth_date()))
                .unwrap_or((true, DateTime::<Utc>::MIN_UTC))
        })
        .collect()
}

fn with_gender(family: &Family, members: Vec<MemberId>, gender: Gender) -> Vec<MemberId> {
    members
        .into_iter()
        .filter(|&id| family.get(id).is_some_and(|m| m.gender() == gender))
        .collect()
}

/// Mother's children except the member itself.
pub fn siblings(family: &Family, member: MemberId) -> Vec<MemberId> {
    let Some(mother) = family.get(member).and_then(|m| m.mother()).and_then(|id| family.get(id)) else {
        return Vec::new();
    };
    let found = mother
        .children()
        .iter()
        .copied()
        .filter(|&child| child != member)
        .collect();
    sort_by_birth(family, found)
}

/// Mother's sisters.
pub fn maternal_aunt(family: &Family, member: MemberId) -> Vec<MemberId> {
    let Some(mother) = family.get(member).and_then(|m| m.mother()) else {
        return Vec::new();
    };
    sort_by_birth(family, sisters(family, mother))
}

pub fn sisters(family: &Family, member: MemberId) -> Vec<MemberId> {
    sort_by_birth(family, with_gender(family, siblings(family, member), Gender::Female))
}

pub fn brothers(family: &Family, member: MemberId) -> Vec<MemberId> {
    sort_by_birth(family, with_gender(family, siblings(family, member), Gender::Male))
}

/// Spouse's sisters followed by the wives of the member's brothers.
///
/// The two halves are not deduplicated.
pub fn sister_in_law(family: &Family, member: MemberId) -> Vec<MemberId> {
    let mut found = family
        .get(member)
        .and_then(|m| m.spouse())
        .map(|spouse| sisters(family, spouse))
        .unwrap_or_default();
    found.extend(
        brothers(family, member)
            .into_iter()
            .filter_map(|brother| family.get(brother).and_then(|b| b.spouse())),
    );
    sort_by_birth(family, found)
}

/// All children, grandchildren and so on.
///
/// Folds the children right to left, starting from the children list and
/// prepending each child's own descendants, so before sorting the result
/// reads `D(c1) ++ D(c2) ++ .. ++ D(cn) ++ [c1 .. cn]`.
pub fn descendants(family: &Family, member: MemberId) -> Vec<MemberId> {
    let Some(children) = family.get(member).map(|m| m.children().to_vec()) else {
        return Vec::new();
    };
    let found = children.iter().rev().fold(children.clone(), |acc, &child| {
        let mut subtree = descendants(family, child);
        subtree.extend(acc);
        subtree
    });
    sort_by_birth(family, found)
}
