//! Domain entities: members and the documents they are imported from and persisted to

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use generational_arena::Index;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Handle of a member inside its owning [`Family`](crate::domain::Family).
pub type MemberId = Index;

/// Gender of a member. Only these two values are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(DomainError::NoSuchGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// A person node in the family graph.
///
/// Relations are handles into the owning family, never owning links.
/// `father` and `mother` are only ever written by the parent side
/// (see [`Family::attach_child`](crate::domain::Family::attach_child)).
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    gender: Gender,
    birth_date: DateTime<Utc>,
    pub(crate) father: Option<MemberId>,
    pub(crate) mother: Option<MemberId>,
    pub(crate) spouse: Option<MemberId>,
    pub(crate) children: Vec<MemberId>,
}

impl Member {
    /// Create an unlinked member. A missing birth date means "now".
    pub fn new(name: impl Into<String>, gender: Gender, birth_date: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            gender,
            birth_date: birth_date.map(|d| d.trunc_subsecs(3)).unwrap_or_else(now),
            father: None,
            mother: None,
            spouse: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_date(&self) -> DateTime<Utc> {
        self.birth_date
    }

    pub fn father(&self) -> Option<MemberId> {
        self.father
    }

    pub fn mother(&self) -> Option<MemberId> {
        self.mother
    }

    pub fn spouse(&self) -> Option<MemberId> {
        self.spouse
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[MemberId] {
        &self.children
    }
}

/// Current time at millisecond precision, the resolution the flat format keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn add_years(date: DateTime<Utc>, years: u32) -> DateTime<Utc> {
    shift_years(date, i64::from(years))
}

/// Move `date` by whole calendar years, backwards when `years` is negative.
/// Saturates at the ends of the representable range.
pub(crate) fn shift_years(date: DateTime<Utc>, years: i64) -> DateTime<Utc> {
    let months = u32::try_from(years.unsigned_abs().saturating_mul(12)).unwrap_or(u32::MAX);
    if years >= 0 {
        date.checked_add_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    } else {
        date.checked_sub_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Node of the nested-tree import document.
///
/// Nodes without a name or a gender are skipped by the importer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, with = "iso_date::option", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Box<NestedMember>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NestedMember>>,
}

/// Relations of one member, referenced by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    #[serde(default)]
    pub father: Option<String>,
    #[serde(default)]
    pub mother: Option<String>,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

/// One member in the flat persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub name: String,
    pub gender: Gender,
    #[serde(with = "iso_date", default = "now")]
    pub birth_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,
}

/// The whole registry in the flat persisted format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRecord {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

/// Parse an ISO 8601 timestamp. Date-only values are taken as midnight UTC.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|n| n.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|n| n.and_utc())
        })
        .map(|d| d.trunc_subsecs(3))
}

/// Serde adapter writing RFC 3339 with millisecond precision.
pub mod iso_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::{parse_iso_date, SecondsFormat};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_iso_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO date: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        use super::super::parse_iso_date;

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => parse_iso_date(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid ISO date: {raw}"))),
                None => Ok(None),
            }
        }
    }
}
