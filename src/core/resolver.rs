use crate::core::directory::RosterDirectory;
use crate::domain::model::{Position, Resolution, ResolvedAnswer, RosterEntry, TeamId};
use crate::domain::ports::RosterQuery;
use crate::utils::error::{OncallError, Result};
use futures::future::try_join_all;
use std::sync::Arc;

/// Resolves a raw command text into an ordered on-call answer: directory
/// lookup, concurrent roster fan-out, position labeling.
pub struct OncallResolver<Q: RosterQuery> {
    directory: Arc<RosterDirectory>,
    roster: Arc<Q>,
}

impl<Q: RosterQuery> OncallResolver<Q> {
    pub fn new(directory: Arc<RosterDirectory>, roster: Arc<Q>) -> Self {
        Self { directory, roster }
    }

    /// Any input that is empty, mentions "help", or names no known team
    /// resolves to a non-answer outcome. Otherwise all rosters for the team
    /// are queried concurrently and joined back in chain order; a single
    /// failed query aborts the whole resolution, so the answer is never
    /// partial.
    pub async fn resolve(&self, raw_text: &str) -> Result<Resolution> {
        let team = TeamId::normalize(raw_text);
        if team.is_empty() || team.as_str().contains("help") {
            return Ok(Resolution::HelpRequested);
        }

        let Some(rosters) = self.directory.lookup(team.as_str()) else {
            return Ok(Resolution::UnknownTeam);
        };

        tracing::debug!(
            team = %team,
            chain = rosters.primary_chain.len(),
            business_hours = rosters.business_hours.is_some(),
            "querying on-call rosters"
        );

        let chain = try_join_all(
            rosters
                .primary_chain
                .iter()
                .map(|roster| self.roster.current_holder(roster)),
        );
        let business_hours = async {
            match &rosters.business_hours {
                Some(roster) => self.roster.current_holder(roster).await.map(Some),
                None => Ok(None),
            }
        };

        let (business_holder, chain_holders) = futures::try_join!(business_hours, chain)
            .map_err(|source| OncallError::ResolutionError {
                team: team.clone(),
                source: Box::new(source),
            })?;

        let mut entries = Vec::with_capacity(chain_holders.len() + 1);
        if let Some(holder) = business_holder {
            entries.push(RosterEntry {
                position: Position::BusinessHours,
                holder,
            });
        }
        // try_join_all keeps input order, so the index here is the chain
        // position even when queries complete out of order.
        for (index, holder) in chain_holders.into_iter().enumerate() {
            entries.push(RosterEntry {
                position: Position::for_chain_index(index),
                holder,
            });
        }

        Ok(Resolution::Answer(ResolvedAnswer { team, entries }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{OncallHolder, RosterRef, TeamRosterSet};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Per-roster canned outcomes, with optional delays to exercise
    /// out-of-order completion.
    struct FakeRoster {
        holders: HashMap<String, OncallHolder>,
        delays_ms: HashMap<String, u64>,
        failing: Vec<String>,
    }

    impl FakeRoster {
        fn new() -> Self {
            Self {
                holders: HashMap::new(),
                delays_ms: HashMap::new(),
                failing: Vec::new(),
            }
        }

        fn with_engineer(mut self, roster: &str, name: &str) -> Self {
            self.holders
                .insert(roster.to_string(), OncallHolder::Engineer(name.to_string()));
            self
        }

        fn with_off_duty(mut self, roster: &str) -> Self {
            self.holders
                .insert(roster.to_string(), OncallHolder::OffDuty);
            self
        }

        fn with_delay(mut self, roster: &str, millis: u64) -> Self {
            self.delays_ms.insert(roster.to_string(), millis);
            self
        }

        fn with_failure(mut self, roster: &str) -> Self {
            self.failing.push(roster.to_string());
            self
        }
    }

    #[async_trait]
    impl RosterQuery for FakeRoster {
        async fn current_holder(&self, roster: &RosterRef) -> Result<OncallHolder> {
            if let Some(millis) = self.delays_ms.get(roster.as_str()) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            if self.failing.iter().any(|r| r == roster.as_str()) {
                return Err(OncallError::RosterQueryError {
                    roster: roster.clone(),
                    source: Box::new(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        "upstream unavailable",
                    )),
                });
            }
            Ok(self
                .holders
                .get(roster.as_str())
                .cloned()
                .unwrap_or(OncallHolder::OffDuty))
        }
    }

    fn directory_with(team: &str, chain: &[&str], business_hours: Option<&str>) -> RosterDirectory {
        let mut directory = RosterDirectory::new();
        directory.insert(
            TeamId::normalize(team),
            TeamRosterSet {
                primary_chain: chain.iter().map(|r| RosterRef::new(*r)).collect(),
                business_hours: business_hours.map(RosterRef::new),
            },
        );
        directory
    }

    fn resolver(directory: RosterDirectory, roster: FakeRoster) -> OncallResolver<FakeRoster> {
        OncallResolver::new(Arc::new(directory), Arc::new(roster))
    }

    #[tokio::test]
    async fn test_help_and_empty_inputs() {
        let resolver = resolver(
            directory_with("payments", &["sched-1"], None),
            FakeRoster::new(),
        );

        for input in ["", "   ", "help", "HELP", "please help me"] {
            assert_eq!(
                resolver.resolve(input).await.unwrap(),
                Resolution::HelpRequested,
                "input {:?}",
                input
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_team() {
        let resolver = resolver(
            directory_with("payments", &["sched-1"], None),
            FakeRoster::new(),
        );

        assert_eq!(
            resolver.resolve("checkout").await.unwrap(),
            Resolution::UnknownTeam
        );
    }

    #[tokio::test]
    async fn test_case_insensitive_variants_resolve_the_same() {
        let roster = FakeRoster::new().with_engineer("sched-1", "Alice");
        let resolver = resolver(directory_with("payments", &["sched-1"], None), roster);

        let lower = resolver.resolve("payments").await.unwrap();
        let upper = resolver.resolve("PAYMENTS").await.unwrap();
        let mixed = resolver.resolve("Payments").await.unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[tokio::test]
    async fn test_chain_order_survives_out_of_order_completion() {
        // C completes first, A last; labels must still follow chain order.
        let roster = FakeRoster::new()
            .with_engineer("sched-a", "Alice")
            .with_delay("sched-a", 60)
            .with_engineer("sched-b", "Bob")
            .with_delay("sched-b", 30)
            .with_engineer("sched-c", "Carol");
        let resolver = resolver(
            directory_with("payments", &["sched-a", "sched-b", "sched-c"], None),
            roster,
        );

        let Resolution::Answer(answer) = resolver.resolve("payments").await.unwrap() else {
            panic!("expected an answer");
        };

        let got: Vec<(Position, OncallHolder)> = answer
            .entries
            .into_iter()
            .map(|e| (e.position, e.holder))
            .collect();
        assert_eq!(
            got,
            vec![
                (Position::Primary, OncallHolder::Engineer("Alice".into())),
                (Position::Secondary, OncallHolder::Engineer("Bob".into())),
                (Position::Tertiary, OncallHolder::Engineer("Carol".into())),
            ]
        );
    }

    #[tokio::test]
    async fn test_off_duty_is_a_valid_entry() {
        let roster = FakeRoster::new()
            .with_engineer("sched-1", "Alice")
            .with_off_duty("sched-2");
        let resolver = resolver(
            directory_with("payments", &["sched-1", "sched-2"], None),
            roster,
        );

        let Resolution::Answer(answer) = resolver.resolve("payments").await.unwrap() else {
            panic!("expected an answer");
        };

        assert_eq!(answer.entries[1].holder, OncallHolder::OffDuty);
        assert_eq!(answer.entries[1].position, Position::Secondary);
    }

    #[tokio::test]
    async fn test_business_hours_is_prepended() {
        let roster = FakeRoster::new()
            .with_engineer("sched-a", "Alice")
            .with_engineer("sched-biz", "Dana")
            .with_delay("sched-biz", 30);
        let resolver = resolver(
            directory_with("platform", &["sched-a"], Some("sched-biz")),
            roster,
        );

        let Resolution::Answer(answer) = resolver.resolve("platform").await.unwrap() else {
            panic!("expected an answer");
        };

        let positions: Vec<Position> = answer.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![Position::BusinessHours, Position::Primary]);
        assert_eq!(
            answer.entries[0].holder,
            OncallHolder::Engineer("Dana".into())
        );
    }

    #[tokio::test]
    async fn test_one_failed_query_fails_the_whole_resolution() {
        let roster = FakeRoster::new()
            .with_engineer("sched-1", "Alice")
            .with_failure("sched-2")
            .with_engineer("sched-3", "Carol");
        let resolver = resolver(
            directory_with("payments", &["sched-1", "sched-2", "sched-3"], None),
            roster,
        );

        let err = resolver.resolve("payments").await.unwrap_err();
        match err {
            OncallError::ResolutionError { team, source } => {
                assert_eq!(team.as_str(), "payments");
                assert!(matches!(*source, OncallError::RosterQueryError { .. }));
            }
            other => panic!("expected ResolutionError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_business_hours_query_also_aborts() {
        let roster = FakeRoster::new()
            .with_engineer("sched-a", "Alice")
            .with_failure("sched-biz");
        let resolver = resolver(
            directory_with("platform", &["sched-a"], Some("sched-biz")),
            roster,
        );

        assert!(matches!(
            resolver.resolve("platform").await,
            Err(OncallError::ResolutionError { .. })
        ));
    }
}
