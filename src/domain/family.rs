//! Family registry: the arena that owns every member.

use std::collections::HashMap;

use generational_arena::Arena;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{add_years, Gender, Member, MemberId, Relations};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::relations::RelationType;

/// Years between a mother's birth and her first child's.
pub const GENERATION_GAP_YEARS: u32 = 30;

/// Years between consecutive children added through [`Family::add_child`].
pub const SIBLING_GAP_YEARS: u32 = 1;

/// Owning registry of members, keyed by unique name.
///
/// All cross-member relations are arena handles, so cycles through
/// marriage and descent never become ownership cycles. The first member
/// ever registered becomes the root and stays root until [`Family::clean`].
#[derive(Debug, Default)]
pub struct Family {
    arena: Arena<Member>,
    index: HashMap<String, MemberId>,
    /// Names in first-registration order, for deterministic enumeration
    order: Vec<String>,
    root: Option<MemberId>,
}

impl Family {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<MemberId> {
        self.root
    }

    pub fn root_member(&self) -> Option<&Member> {
        self.root.and_then(|idx| self.arena.get(idx))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.arena.get(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<MemberId> {
        self.index.get(name).copied()
    }

    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.find_by_name(name).and_then(|id| self.arena.get(id))
    }

    /// Name of a member, if the handle is alive.
    pub fn name_of(&self, id: MemberId) -> Option<&str> {
        self.arena.get(id).map(Member::name)
    }

    /// Registered members in first-registration order.
    pub fn members(&self) -> impl Iterator<Item = (MemberId, &Member)> + '_ {
        self.order.iter().filter_map(move |name| {
            let id = *self.index.get(name)?;
            self.arena.get(id).map(|member| (id, member))
        })
    }

    /// Drop every member and unset the root.
    #[instrument(level = "debug", skip(self))]
    pub fn clean(&mut self) {
        debug!("clean: dropping {} members", self.index.len());
        self.arena.clear();
        self.index.clear();
        self.order.clear();
        self.root = None;
    }

    /// Register a member under its name, claiming the root if none is set.
    ///
    /// A member registered under an existing name replaces the earlier
    /// index entry.
    pub fn register(&mut self, member: Member) -> MemberId {
        self.insert(member, true)
    }

    pub(crate) fn insert(&mut self, member: Member, claim_root: bool) -> MemberId {
        let name = member.name().to_string();
        let id = self.arena.insert(member);
        if self.index.insert(name.clone(), id).is_some() {
            warn!("register: {} already registered, replacing entry", name);
        } else {
            self.order.push(name);
        }
        if claim_root && self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    pub(crate) fn set_root(&mut self, id: MemberId) {
        self.root = Some(id);
    }

    pub(crate) fn get_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.arena.get_mut(id)
    }

    fn require(&self, id: MemberId) -> DomainResult<&Member> {
        self.arena
            .get(id)
            .ok_or_else(|| DomainError::PersonNotFound(format!("{id:?}")))
    }

    /// Marry two members, keeping the relation symmetric.
    ///
    /// An existing spouse is not unlinked: the previous partner keeps
    /// pointing at `member`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_spouse(&mut self, member: MemberId, spouse: MemberId) -> DomainResult<()> {
        self.add_spouse_inner(member, spouse, false)
    }

    fn add_spouse_inner(&mut self, member: MemberId, spouse: MemberId, mutual: bool) -> DomainResult<()> {
        let (me, other) = (self.require(member)?, self.require(spouse)?);
        if me.gender() == other.gender() {
            return Err(DomainError::NoSameSexMarriage {
                member: me.name().to_string(),
                spouse: other.name().to_string(),
            });
        }
        // TODO: unlink a previous spouse once remarriage is modeled
        if let Some(me) = self.arena.get_mut(member) {
            me.spouse = Some(spouse);
        }
        if !mutual {
            self.add_spouse_inner(spouse, member, true)?;
        }
        Ok(())
    }

    /// Attach `child` under `parent` and under the parent's spouse.
    ///
    /// Sets the child's father or mother from the acting parent's gender.
    /// Attaching a child twice is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn attach_child(&mut self, parent: MemberId, child: MemberId) -> DomainResult<()> {
        self.attach_child_inner(parent, child, false)
    }

    fn attach_child_inner(&mut self, parent: MemberId, child: MemberId, mutual: bool) -> DomainResult<()> {
        self.require(child)?;
        let acting = self.require(parent)?;
        let spouse = match (acting.spouse(), mutual) {
            (Some(spouse), _) => Some(spouse),
            (None, true) => None,
            (None, false) => {
                return Err(DomainError::NoSpouse {
                    member: acting.name().to_string(),
                })
            }
        };
        if acting.children().contains(&child) {
            return Ok(());
        }
        let gender = acting.gender();

        if let Some(acting) = self.arena.get_mut(parent) {
            acting.children.push(child);
        }
        if let Some(child) = self.arena.get_mut(child) {
            match gender {
                Gender::Male => child.father = Some(parent),
                Gender::Female => child.mother = Some(parent),
            }
        }
        if let (false, Some(spouse)) = (mutual, spouse) {
            self.attach_child_inner(spouse, child, true)?;
        }
        Ok(())
    }

    /// Add a new child through its mother.
    ///
    /// The birth date follows the mother's most recently added child by
    /// one year, or the mother herself by a generation when she has none.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, mother_name: &str, name: &str, gender: &str) -> DomainResult<MemberId> {
        let mother_id = self
            .find_by_name(mother_name)
            .ok_or_else(|| DomainError::PersonNotFound(mother_name.to_string()))?;
        let mother = self.require(mother_id)?;
        if mother.gender() != Gender::Female {
            return Err(DomainError::OnlyThroughMother(mother_name.to_string()));
        }
        if self.index.contains_key(name) {
            return Err(DomainError::PersonExist(name.to_string()));
        }
        let gender: Gender = gender.parse()?;
        if mother.spouse().is_none() {
            return Err(DomainError::NoSpouse {
                member: mother_name.to_string(),
            });
        }

        let birth_date = match mother.children().last().and_then(|&id| self.arena.get(id)) {
            Some(youngest) => add_years(youngest.birth_date(), SIBLING_GAP_YEARS),
            None => add_years(mother.birth_date(), GENERATION_GAP_YEARS),
        };
        debug!("add_child: mother={}, name={}, birth_date={}", mother_name, name, birth_date);

        let child = self.register(Member::new(name, gender, Some(birth_date)));
        self.attach_child(mother_id, child)?;
        Ok(child)
    }

    /// Names of the members related to `person_name` by `relation_name`,
    /// ordered by birth date.
    #[instrument(level = "debug", skip(self))]
    pub fn get_relationship(&self, person_name: &str, relation_name: &str) -> DomainResult<Vec<String>> {
        let person = self
            .find_by_name(person_name)
            .ok_or_else(|| DomainError::PersonNotFound(person_name.to_string()))?;
        let relation: RelationType = relation_name.parse()?;
        let related = relation.derive(self, person);
        debug!("get_relationship: {} {} -> {} members", person_name, relation, related.len());
        Ok(self.names(&related))
    }

    /// Project handles to names, dropping dead handles.
    pub fn names(&self, ids: &[MemberId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.name_of(id).map(str::to_string))
            .collect()
    }

    /// Relations of a member as names, for the flat record format.
    pub fn export_relations(&self, id: MemberId) -> Relations {
        let Some(member) = self.arena.get(id) else {
            return Relations::default();
        };
        let name = |rel: Option<MemberId>| rel.and_then(|r| self.name_of(r)).map(str::to_string);
        Relations {
            father: name(member.father()),
            mother: name(member.mother()),
            spouse: name(member.spouse()),
            children: self.names(member.children()),
        }
    }
}
