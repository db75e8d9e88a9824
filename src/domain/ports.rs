use crate::domain::model::{OncallHolder, RosterRef};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Boundary to the external on-call roster service.
#[async_trait]
pub trait RosterQuery: Send + Sync {
    /// Current holder of one roster, or the off-duty sentinel when nobody is
    /// assigned. Transport and service failures surface as
    /// `RosterQueryError`; the implementation enforces its own per-query
    /// timeout so one hung roster cannot stall a whole resolution.
    async fn current_holder(&self, roster: &RosterRef) -> Result<OncallHolder>;
}

/// Reply channel supplied by the hosting chat integration. Called exactly
/// once per handled command.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn reply(&self, text: &str) -> Result<()>;
}
