//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the family graph rules.
///
/// Every kind carries a numeric code and a short machine-readable tag
/// next to its human message, so a dispatcher can report any of the three.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{member} has no spouse: you can not add a child without a spouse")]
    NoSpouse { member: String },

    #[error("{member} and {spouse} have the same gender: same-sex marriages are not supported yet")]
    NoSameSexMarriage { member: String, spouse: String },

    #[error("no such gender: {0}")]
    NoSuchGender(String),

    #[error("person not found: {0}")]
    PersonNotFound(String),

    #[error("person already exists: {0}")]
    PersonExist(String),

    #[error("{0} is not female: children can only be added through the mother")]
    OnlyThroughMother(String),

    #[error("relationship not found: {0}")]
    RelationshipNotFound(String),
}

impl DomainError {
    /// Numeric code of the error kind.
    pub fn code(&self) -> u16 {
        match self {
            DomainError::NoSpouse { .. }
            | DomainError::NoSameSexMarriage { .. }
            | DomainError::NoSuchGender(_)
            | DomainError::OnlyThroughMother(_) => 400,
            DomainError::PersonNotFound(_) | DomainError::RelationshipNotFound(_) => 404,
            DomainError::PersonExist(_) => 409,
        }
    }

    /// Short tag printed by dispatchers instead of the full message.
    pub fn short(&self) -> &'static str {
        match self {
            DomainError::NoSpouse { .. } => "MEMBER_HAS_NO_SPOUSE",
            DomainError::NoSameSexMarriage { .. } => "NO_SAME_SEX_MARRIAGE",
            DomainError::NoSuchGender(_) => "NO_SUCH_GENDER",
            DomainError::PersonNotFound(_) => "PERSON_NOT_FOUND",
            DomainError::PersonExist(_) | DomainError::OnlyThroughMother(_) => {
                "CHILD_ADDITION_FAILED"
            }
            DomainError::RelationshipNotFound(_) => "RELATIONSHIP_NOT_FOUND",
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_child_addition_failures_when_short_then_share_tag() {
        assert_eq!(
            DomainError::PersonExist("Bill".into()).short(),
            DomainError::OnlyThroughMother("Bill".into()).short()
        );
        assert_eq!(DomainError::PersonExist("Bill".into()).code(), 409);
    }

    #[test]
    fn given_no_spouse_when_display_then_names_member() {
        let err = DomainError::NoSpouse {
            member: "Charlie".into(),
        };
        assert!(err.to_string().starts_with("Charlie has no spouse"));
        assert_eq!(err.short(), "MEMBER_HAS_NO_SPOUSE");
    }
}
