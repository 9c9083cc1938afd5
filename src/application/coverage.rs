//! # Coverage Monitor
//!
//! Background check that counts supervisors present in the monitoring room and warns when
//! coverage drops below the configured minimum. The interval is re-read from
//! `CoverageSettings` every cycle, so `set_coverage_timer` takes effect on the next check.

use std::sync::Arc;

use crate::application::roles::RoleResolver;
use crate::application::settings::CoverageSettings;
use crate::domain::traits::RosterProvider;
use crate::domain::types::PrivilegeTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStatus {
    Covered(usize),
    Low(usize),
}

pub struct CoverageMonitor {
    room: String,
    minimum: usize,
    resolver: RoleResolver,
    settings: CoverageSettings,
    roster: Arc<dyn RosterProvider>,
}

impl CoverageMonitor {
    pub fn new(
        room: String,
        minimum: usize,
        resolver: RoleResolver,
        settings: CoverageSettings,
        roster: Arc<dyn RosterProvider>,
    ) -> Self {
        Self {
            room,
            minimum,
            resolver,
            settings,
            roster,
        }
    }

    pub async fn check_once(&self) -> Result<CoverageStatus, String> {
        let members = self.roster.joined_members(&self.room).await?;
        let on_duty = members
            .iter()
            .filter(|m| self.resolver.resolve(&m.roles) >= PrivilegeTier::TrialSupervisor)
            .count();

        if on_duty < self.minimum {
            tracing::warn!(
                "{}",
                crate::strings::logs::coverage_low(&self.room, on_duty, self.minimum)
            );
            Ok(CoverageStatus::Low(on_duty))
        } else {
            tracing::debug!("Supervisor coverage in {}: {}", self.room, on_duty);
            Ok(CoverageStatus::Covered(on_duty))
        }
    }

    pub async fn run(self) {
        loop {
            tokio::time::sleep(self.settings.interval()).await;
            if let Err(e) = self.check_once().await {
                tracing::error!("Coverage check failed for {}: {}", self.room, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::RoleBinding;
    use crate::domain::types::Member;
    use async_trait::async_trait;

    struct FixedRoster(Result<Vec<Member>, String>);

    #[async_trait]
    impl RosterProvider for FixedRoster {
        async fn joined_members(&self, _channel: &str) -> Result<Vec<Member>, String> {
            self.0.clone()
        }
    }

    fn monitor(roster: FixedRoster, minimum: usize) -> CoverageMonitor {
        let resolver = RoleResolver::new(&[
            RoleBinding {
                id: "supervisor".to_string(),
                tier: PrivilegeTier::Supervisor,
                users: Vec::new(),
                room: None,
            },
            RoleBinding {
                id: "trial-supervisor".to_string(),
                tier: PrivilegeTier::TrialSupervisor,
                users: Vec::new(),
                room: None,
            },
        ]);
        CoverageMonitor::new(
            "!floor:example.org".to_string(),
            minimum,
            resolver,
            CoverageSettings::new(1),
            Arc::new(roster),
        )
    }

    #[tokio::test]
    async fn test_counts_privileged_members_only() {
        let roster = FixedRoster(Ok(vec![
            Member::new("@a:x").with_role("supervisor"),
            Member::new("@b:x").with_role("trial-supervisor"),
            Member::new("@c:x").with_role("member"),
            Member::new("@d:x"),
        ]));
        assert_eq!(monitor(roster, 2).check_once().await, Ok(CoverageStatus::Covered(2)));
    }

    #[tokio::test]
    async fn test_low_coverage() {
        let roster = FixedRoster(Ok(vec![Member::new("@c:x").with_role("member")]));
        assert_eq!(monitor(roster, 1).check_once().await, Ok(CoverageStatus::Low(0)));
    }

    #[tokio::test]
    async fn test_roster_failure_propagates() {
        let roster = FixedRoster(Err("not joined".to_string()));
        assert!(monitor(roster, 1).check_once().await.is_err());
    }
}
