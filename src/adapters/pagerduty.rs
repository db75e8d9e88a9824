use crate::domain::model::{OncallHolder, RosterRef};
use crate::domain::ports::RosterQuery;
use crate::utils::error::{OncallError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Response shape of the `/oncalls` endpoint. The service returns
/// assignments ordered by escalation level; only the first one is used.
#[derive(Debug, Deserialize)]
struct OncallsResponse {
    oncalls: Vec<OncallAssignment>,
}

#[derive(Debug, Deserialize)]
struct OncallAssignment {
    user: AssignedUser,
}

#[derive(Debug, Deserialize)]
struct AssignedUser {
    summary: String,
}

/// Roster client backed by the PagerDuty REST API. Enforces a per-query
/// timeout so one hung request cannot stall the fan-out that awaits it.
pub struct PagerDutyClient {
    client: Client,
    api_base: String,
    token: String,
}

impl PagerDutyClient {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(OncallError::ApiError)?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl RosterQuery for PagerDutyClient {
    async fn current_holder(&self, roster: &RosterRef) -> Result<OncallHolder> {
        let url = format!("{}/oncalls", self.api_base);
        let wrap = |source: reqwest::Error| OncallError::RosterQueryError {
            roster: roster.clone(),
            source: Box::new(source),
        };

        tracing::debug!(roster = %roster, "querying roster service");

        let response = self
            .client
            .get(&url)
            .query(&[("schedule_ids[]", roster.as_str())])
            .header("Authorization", format!("Token token={}", self.token))
            .send()
            .await
            .map_err(wrap)?
            .error_for_status()
            .map_err(wrap)?;

        let payload: OncallsResponse = response.json().await.map_err(wrap)?;

        match payload.oncalls.into_iter().next() {
            Some(assignment) => {
                tracing::debug!(roster = %roster, engineer = %assignment.user.summary, "roster resolved");
                Ok(OncallHolder::Engineer(assignment.user.summary))
            }
            None => {
                // Empty oncalls list means nobody is assigned right now.
                tracing::debug!(roster = %roster, "roster has nobody assigned");
                Ok(OncallHolder::OffDuty)
            }
        }
    }
}
