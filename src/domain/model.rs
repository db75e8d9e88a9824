use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized team key: trimmed and lower-cased so lookups are
/// case-insensitive. Directory keys are stored already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier naming one roster (schedule) in the external on-call
/// service. Immutable once configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRef(String);

impl RosterRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RosterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rosters configured for one team. The chain order is significant and is
/// preserved end-to-end; it is never reordered after configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRosterSet {
    pub primary_chain: Vec<RosterRef>,
    pub business_hours: Option<RosterRef>,
}

/// Result of resolving one roster. Nobody being assigned is a valid outcome,
/// kept distinct from a query failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OncallHolder {
    Engineer(String),
    OffDuty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    BusinessHours,
    Primary,
    Secondary,
    Tertiary,
    Current,
}

impl Position {
    /// Label for a chain index. Anything past the third slot reports as
    /// "Current". Business hours is assigned separately and never counts
    /// in this numbering.
    pub fn for_chain_index(index: usize) -> Self {
        match index {
            0 => Position::Primary,
            1 => Position::Secondary,
            2 => Position::Tertiary,
            _ => Position::Current,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::BusinessHours => "Business Hours",
            Position::Primary => "Primary",
            Position::Secondary => "Secondary",
            Position::Tertiary => "Tertiary",
            Position::Current => "Current",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub position: Position,
    pub holder: OncallHolder,
}

/// Ordered answer for one team, ready for rendering: business hours first
/// when present, then the chain in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub team: TeamId,
    pub entries: Vec<RosterEntry>,
}

/// Outcome of resolving one command. Help and unknown-team both render as
/// the help message but stay distinct variants for testability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Answer(ResolvedAnswer),
    HelpRequested,
    UnknownTeam,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_normalization() {
        assert_eq!(TeamId::normalize("  Payments "), TeamId::normalize("payments"));
        assert_eq!(TeamId::normalize("TEAM").as_str(), "team");
        assert!(TeamId::normalize("   ").is_empty());
    }

    #[test]
    fn test_chain_index_labels() {
        assert_eq!(Position::for_chain_index(0), Position::Primary);
        assert_eq!(Position::for_chain_index(1), Position::Secondary);
        assert_eq!(Position::for_chain_index(2), Position::Tertiary);
        assert_eq!(Position::for_chain_index(3), Position::Current);
        assert_eq!(Position::for_chain_index(7), Position::Current);
    }

    #[test]
    fn test_position_labels() {
        assert_eq!(Position::BusinessHours.label(), "Business Hours");
        assert_eq!(Position::Primary.to_string(), "Primary");
    }
}
