//! In-process skill registry.
//!
//! The registry owns the authoritative name -> [`Skill`] table. Lookups hand
//! out `Arc<Skill>` snapshots, so a run that already resolved a skill keeps
//! executing the body it resolved even if the name is re-registered
//! concurrently. Replacement is atomic per key.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use autolearn_types::skill::SkillMeta;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::body::{Skill, SkillBody};
use super::error::SkillError;

/// Table slot: the skill plus its first-registration sequence number, which
/// fixes its position in [`SkillRegistry::list`].
struct Slot {
    seq: u64,
    skill: Arc<Skill>,
}

/// Name-indexed table of registered skills, safe to share across threads.
pub struct SkillRegistry {
    skills: DashMap<String, Slot>,
    next_seq: AtomicU64,
}

impl SkillRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            skills: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Register a skill, replacing any existing entry with the same name.
    ///
    /// A replaced skill keeps its original listing position. Returns `true`
    /// when an existing entry was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::InvalidSkill`] if the name is empty or contains
    /// characters other than ASCII alphanumerics, `_`, `-` and `.`.
    pub fn register(&self, meta: SkillMeta, body: Arc<dyn SkillBody>) -> Result<bool, SkillError> {
        validate_name(&meta.name)?;

        let name = meta.name.clone();
        let skill = Arc::new(Skill::new(meta, body));

        let replaced = match self.skills.entry(name.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().skill = skill;
                true
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Slot {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    skill,
                });
                false
            }
        };

        tracing::info!(skill = %name, replaced, "skill registered");
        Ok(replaced)
    }

    /// Look up a skill by name.
    pub fn get(&self, name: &str) -> Result<Arc<Skill>, SkillError> {
        self.skills
            .get(name)
            .map(|slot| Arc::clone(&slot.skill))
            .ok_or_else(|| SkillError::NotFound(name.to_string()))
    }

    /// Remove a skill, returning its metadata if it was registered.
    pub fn remove(&self, name: &str) -> Option<SkillMeta> {
        let removed = self
            .skills
            .remove(name)
            .map(|(_, slot)| slot.skill.meta().clone());
        if removed.is_some() {
            tracing::info!(skill = %name, "skill removed");
        }
        removed
    }

    /// Snapshot of all registered metadata in first-registration order.
    pub fn list(&self) -> Vec<SkillMeta> {
        let mut entries: Vec<(u64, SkillMeta)> = self
            .skills
            .iter()
            .map(|slot| (slot.seq, slot.skill.meta().clone()))
            .collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, meta)| meta).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SkillRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillRegistry")
            .field("skills", &self.skills.len())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<(), SkillError> {
    let invalid = |reason: &str| SkillError::InvalidSkill {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(invalid(&format!("name contains invalid character {c:?}")));
    }
    Ok(())
}
