use crate::domain::model::{TeamId, TeamRosterSet};

/// Static team -> roster mapping, built once at startup and read-only for
/// the process lifetime. Insertion order is preserved because it drives the
/// team listing in the help message.
#[derive(Debug, Clone, Default)]
pub struct RosterDirectory {
    teams: Vec<(TeamId, TeamRosterSet)>,
}

impl RosterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, team: TeamId, rosters: TeamRosterSet) {
        self.teams.push((team, rosters));
    }

    /// Case-insensitive lookup. Empty input and the literal keyword "help"
    /// always miss; they belong to the help flow.
    pub fn lookup(&self, raw: &str) -> Option<&TeamRosterSet> {
        let key = TeamId::normalize(raw);
        if key.is_empty() || key.as_str() == "help" {
            return None;
        }

        self.teams
            .iter()
            .find(|(id, _)| *id == key)
            .map(|(_, rosters)| rosters)
    }

    /// Known team identifiers in configuration insertion order, stable
    /// across calls.
    pub fn known_teams(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
