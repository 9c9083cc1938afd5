//! # Role Resolver
//!
//! Maps the set of roles a member holds to a single privilege tier.
//! The role table is resolved once at startup into an immutable lookup.

use std::collections::{HashMap, HashSet};

use crate::domain::config::RoleBinding;
use crate::domain::types::{PrivilegeTier, RoleId};

#[derive(Debug, Clone, Default)]
pub struct RoleResolver {
    tiers: HashMap<RoleId, PrivilegeTier>,
}

impl RoleResolver {
    pub fn new(bindings: &[RoleBinding]) -> Self {
        let mut tiers: HashMap<RoleId, PrivilegeTier> = HashMap::new();
        for binding in bindings {
            let entry = tiers
                .entry(RoleId::new(binding.id.clone()))
                .or_insert(binding.tier);
            if binding.tier > *entry {
                tracing::warn!(
                    "Role '{}' bound to several tiers, keeping {}",
                    binding.id,
                    binding.tier
                );
                *entry = binding.tier;
            }
        }
        Self { tiers }
    }

    /// Highest tier among the held privilege roles, `PrivilegeTier::None` if there are none.
    pub fn resolve(&self, held: &HashSet<RoleId>) -> PrivilegeTier {
        held.iter()
            .filter_map(|role| self.tiers.get(role).copied())
            .max()
            .unwrap_or(PrivilegeTier::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(id: &str, tier: PrivilegeTier) -> RoleBinding {
        RoleBinding {
            id: id.to_string(),
            tier,
            users: Vec::new(),
            room: None,
        }
    }

    fn resolver() -> RoleResolver {
        RoleResolver::new(&[
            binding("server-manager", PrivilegeTier::Management),
            binding("internal-affairs", PrivilegeTier::InternalAffairs),
            binding("senior-supervisor", PrivilegeTier::SeniorSupervisor),
            binding("supervisor", PrivilegeTier::Supervisor),
            binding("trial-supervisor", PrivilegeTier::TrialSupervisor),
        ])
    }

    fn held(roles: &[&str]) -> HashSet<RoleId> {
        roles.iter().map(|r| RoleId::new(*r)).collect()
    }

    #[test]
    fn test_single_role_resolves_to_its_tier() {
        let r = resolver();
        assert_eq!(r.resolve(&held(&["server-manager"])), PrivilegeTier::Management);
        assert_eq!(r.resolve(&held(&["internal-affairs"])), PrivilegeTier::InternalAffairs);
        assert_eq!(r.resolve(&held(&["senior-supervisor"])), PrivilegeTier::SeniorSupervisor);
        assert_eq!(r.resolve(&held(&["supervisor"])), PrivilegeTier::Supervisor);
        assert_eq!(r.resolve(&held(&["trial-supervisor"])), PrivilegeTier::TrialSupervisor);
    }

    #[test]
    fn test_highest_tier_wins() {
        let r = resolver();
        assert_eq!(
            r.resolve(&held(&["supervisor", "server-manager"])),
            PrivilegeTier::Management
        );
        assert_eq!(
            r.resolve(&held(&["trial-supervisor", "internal-affairs", "member"])),
            PrivilegeTier::InternalAffairs
        );
    }

    #[test]
    fn test_no_privilege_role_is_none() {
        let r = resolver();
        assert_eq!(r.resolve(&held(&[])), PrivilegeTier::None);
        assert_eq!(r.resolve(&held(&["member", "verified"])), PrivilegeTier::None);
    }

    #[test]
    fn test_duplicate_binding_keeps_higher_tier() {
        let r = RoleResolver::new(&[
            binding("staff", PrivilegeTier::Supervisor),
            binding("staff", PrivilegeTier::InternalAffairs),
            binding("staff", PrivilegeTier::TrialSupervisor),
        ]);
        assert_eq!(r.resolve(&held(&["staff"])), PrivilegeTier::InternalAffairs);
    }
}
