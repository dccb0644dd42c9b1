//! Flat record codec: the registry's durable, name-referenced form.

use tracing::{debug, instrument, warn};

use crate::domain::entities::{FamilyRecord, Member, MemberId, MemberRecord};
use crate::domain::family::Family;

impl Family {
    /// Snapshot every registered member, in registration order.
    #[instrument(level = "debug", skip(self))]
    pub fn to_record(&self) -> FamilyRecord {
        let members: Vec<MemberRecord> = self
            .members()
            .map(|(id, member)| MemberRecord {
                name: member.name().to_string(),
                gender: member.gender(),
                birth_date: member.birth_date(),
                relations: Some(self.export_relations(id)),
            })
            .collect();
        debug!("to_record: {} members", members.len());
        FamilyRecord {
            root: self.root_member().map(|m| m.name().to_string()),
            members,
        }
    }

    /// Load a flat record into the registry.
    ///
    /// First every record becomes a bare member, then relations are
    /// resolved by name. Relations only fill gaps: a father, mother or
    /// spouse already set is kept, and children are only loaded into an
    /// empty children list. Names that do not resolve are skipped.
    #[instrument(level = "debug", skip(self, record))]
    pub fn load_record(&mut self, record: &FamilyRecord) {
        for entry in &record.members {
            self.insert(
                Member::new(entry.name.clone(), entry.gender, Some(entry.birth_date)),
                false,
            );
        }

        for entry in &record.members {
            let Some(relations) = &entry.relations else {
                continue;
            };
            let Some(id) = self.find_by_name(&entry.name) else {
                continue;
            };
            let father = self.resolve(relations.father.as_deref());
            let mother = self.resolve(relations.mother.as_deref());
            let spouse = self.resolve(relations.spouse.as_deref());
            let children: Vec<MemberId> = relations
                .children
                .iter()
                .filter_map(|name| self.resolve(Some(name)))
                .collect();

            let Some(member) = self.get_mut(id) else {
                continue;
            };
            if member.father.is_none() {
                member.father = father;
            }
            if member.mother.is_none() {
                member.mother = mother;
            }
            if member.spouse.is_none() {
                member.spouse = spouse;
            }
            if member.children.is_empty() {
                member.children = children;
            }
        }

        if self.root().is_none() {
            match record.root.as_deref() {
                Some(name) => match self.find_by_name(name) {
                    Some(root) => self.set_root(root),
                    None => warn!("load_record: root {} is not a member", name),
                },
                None => debug!("load_record: record has no root"),
            }
        }
        debug!("load_record: {} members registered", self.len());
    }

    fn resolve(&self, name: Option<&str>) -> Option<MemberId> {
        let name = name?;
        let found = self.find_by_name(name);
        if found.is_none() {
            warn!("load_record: unknown member {} referenced", name);
        }
        found
    }
}
