use crate::core::directory::RosterDirectory;
use crate::domain::model::{OncallHolder, Resolution, ResolvedAnswer};
use std::sync::Arc;

const OFF_DUTY_TEXT: &str = "Currently Off Duty";

/// Renders a resolution outcome into the chat reply text.
pub struct ResponseFormatter {
    directory: Arc<RosterDirectory>,
}

impl ResponseFormatter {
    pub fn new(directory: Arc<RosterDirectory>) -> Self {
        Self { directory }
    }

    pub fn render(&self, resolution: &Resolution) -> String {
        match resolution {
            Resolution::HelpRequested | Resolution::UnknownTeam => self.help_message(),
            Resolution::Answer(answer) => Self::render_answer(answer),
        }
    }

    /// Built at render time from the directory, so newly configured teams
    /// show up without touching this module.
    pub fn help_message(&self) -> String {
        let teams = self
            .directory
            .known_teams()
            .map(|team| format!("`{}`", team))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Please provide a team name for the oncall engineers you would like to lookup. \
             Example: `/oncall <team_name>` or `@oncall-bot <team_name>`. \
             Allowed team names are: {}.",
            teams
        )
    }

    fn render_answer(answer: &ResolvedAnswer) -> String {
        let entries = answer
            .entries
            .iter()
            .map(|entry| {
                let holder = match &entry.holder {
                    OncallHolder::Engineer(name) => name.as_str(),
                    OncallHolder::OffDuty => OFF_DUTY_TEXT,
                };
                format!("*{}*: {}", entry.position, holder)
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "*{}* On Call Engineers - {}",
            answer.team.as_str().to_uppercase(),
            entries
        )
    }
}
