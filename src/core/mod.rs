pub mod directory;
pub mod format;
pub mod resolver;
pub mod service;

pub use crate::domain::model::{
    OncallHolder, Position, Resolution, ResolvedAnswer, RosterEntry, RosterRef, TeamId,
    TeamRosterSet,
};
pub use crate::domain::ports::{ReplySink, RosterQuery};
pub use crate::utils::error::Result;
