//! Tree importer: builds members from a nested-tree document.
//!
//! Import runs in two phases. Planning walks the document, infers birth
//! dates and validates every node, fanning out over children in parallel.
//! Attachment then registers and links the planned members strictly in
//! document order, so the registry is only touched once the whole
//! document is known to be valid.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::entities::{now, shift_years, Gender, Member, MemberId, NestedMember};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::family::{Family, GENERATION_GAP_YEARS};

/// Age assumed for the top-level member when its birth date is missing.
pub const DEFAULT_ROOT_AGE: u32 = 350;

/// Tunables of the age inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Inherited age of the top-level node
    pub root_age: u32,
    /// Years subtracted once when descending to children
    pub generation_gap: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            root_age: DEFAULT_ROOT_AGE,
            generation_gap: GENERATION_GAP_YEARS,
        }
    }
}

/// A validated node, ready to be attached.
#[derive(Debug)]
struct PlannedMember {
    name: String,
    gender: Gender,
    birth_date: DateTime<Utc>,
    spouse: Option<Box<PlannedMember>>,
    children: Vec<PlannedMember>,
}

/// Imports nested-tree documents into a [`Family`].
#[derive(Debug, Default)]
pub struct TreeImporter {
    options: ImportOptions,
}

impl TreeImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Import `tree` into `family` and return the top-level member.
    ///
    /// Returns `None` when the top-level node lacks a name or a gender.
    /// The first member built claims the root if the family has none.
    #[instrument(level = "debug", skip(self, family, tree))]
    pub fn import(&self, family: &mut Family, tree: &NestedMember) -> DomainResult<Option<MemberId>> {
        self.import_at(family, tree, now())
    }

    /// Like [`TreeImporter::import`], with a fixed "now" for age inference.
    pub fn import_at(
        &self,
        family: &mut Family,
        tree: &NestedMember,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<MemberId>> {
        let Some(plan) = self.plan(tree, i64::from(self.options.root_age), now)? else {
            debug!("import: top-level node has no name or gender, skipped");
            return Ok(None);
        };
        let root = attach(family, plan)?;
        debug!("import: {} members registered", family.len());
        Ok(Some(root))
    }

    /// `age` goes negative deep in a tree, which yields birth dates after `now`.
    fn plan(&self, node: &NestedMember, age: i64, now: DateTime<Utc>) -> DomainResult<Option<PlannedMember>> {
        let (Some(name), Some(gender)) = (node.name.as_deref(), node.gender.as_deref()) else {
            return Ok(None);
        };
        let gender: Gender = gender.parse()?;
        let birth_date = node.birth_date.unwrap_or_else(|| shift_years(now, age.saturating_neg()));

        let spouse = match node.spouse.as_deref() {
            Some(spouse) => self.plan(spouse, age, now)?,
            None => None,
        };
        if let Some(spouse) = &spouse {
            if spouse.gender == gender {
                return Err(DomainError::NoSameSexMarriage {
                    member: name.to_string(),
                    spouse: spouse.name.clone(),
                });
            }
        }

        let children = match node.children.as_deref() {
            Some(children) if !children.is_empty() => {
                let age = age.saturating_sub(i64::from(self.options.generation_gap));
                // Fan out, results come back in document order
                let planned: Vec<DomainResult<Option<PlannedMember>>> = children
                    .par_iter()
                    .enumerate()
                    .map(|(i, child)| {
                        let offset = i64::try_from(i).unwrap_or(i64::MAX);
                        self.plan(child, age.saturating_sub(offset), now)
                    })
                    .collect();
                let mut children = Vec::with_capacity(planned.len());
                for child in planned {
                    children.extend(child?);
                }
                children
            }
            _ => Vec::new(),
        };
        if !children.is_empty() && spouse.is_none() {
            return Err(DomainError::NoSpouse {
                member: name.to_string(),
            });
        }

        Ok(Some(PlannedMember {
            name: name.to_string(),
            gender,
            birth_date,
            spouse: spouse.map(Box::new),
            children,
        }))
    }
}

fn attach(family: &mut Family, plan: PlannedMember) -> DomainResult<MemberId> {
    let PlannedMember {
        name,
        gender,
        birth_date,
        spouse,
        children,
    } = plan;
    let member = family.register(Member::new(name, gender, Some(birth_date)));
    if let Some(spouse) = spouse {
        let spouse = attach(family, *spouse)?;
        family.add_spouse(member, spouse)?;
    }
    let children = children
        .into_iter()
        .map(|child| attach(family, child))
        .collect::<DomainResult<Vec<_>>>()?;
    for child in children {
        family.attach_child(member, child)?;
    }
    Ok(member)
}
