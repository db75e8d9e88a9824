use crate::core::directory::RosterDirectory;
use crate::core::format::ResponseFormatter;
use crate::core::resolver::OncallResolver;
use crate::domain::model::Resolution;
use crate::domain::ports::{ReplySink, RosterQuery};
use crate::utils::error::Result;
use std::sync::Arc;

/// Sent when resolution fails. Deliberately distinct from the help message:
/// the user typed a valid team, the lookup itself broke.
pub const FAILURE_MESSAGE: &str =
    "Sorry, I could not reach the on-call roster service. Please try again in a moment.";

/// Ties resolver and formatter together and guarantees every handled
/// command gets exactly one reply, failures included.
pub struct BotService<Q: RosterQuery> {
    resolver: OncallResolver<Q>,
    formatter: ResponseFormatter,
}

impl<Q: RosterQuery> BotService<Q> {
    pub fn new(directory: Arc<RosterDirectory>, roster: Arc<Q>) -> Self {
        Self {
            resolver: OncallResolver::new(directory.clone(), roster),
            formatter: ResponseFormatter::new(directory),
        }
    }

    pub async fn handle<R: ReplySink>(&self, command_text: &str, sink: &R) -> Result<()> {
        let text = self.answer(command_text).await;
        sink.reply(&text).await
    }

    /// Reply text for one command. Resolution failures are logged and turned
    /// into the generic failure text here, so the command is never left
    /// unanswered.
    pub async fn answer(&self, command_text: &str) -> String {
        match self.resolver.resolve(command_text).await {
            Ok(resolution) => {
                if let Resolution::Answer(answer) = &resolution {
                    tracing::info!(
                        team = %answer.team,
                        entries = answer.entries.len(),
                        "resolved on-call roster"
                    );
                }
                self.formatter.render(&resolution)
            }
            Err(e) => {
                tracing::error!("on-call resolution failed: {}", e);
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}
