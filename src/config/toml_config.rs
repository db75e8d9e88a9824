use crate::core::directory::RosterDirectory;
use crate::domain::model::{RosterRef, TeamId, TeamRosterSet};
use crate::utils::error::{OncallError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub server: ServerConfig,
    pub pagerduty: PagerDutyConfig,
    pub teams: Vec<TeamConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerDutyConfig {
    pub api_base: String,
    pub token: String,
    pub timeout_seconds: Option<u64>,
}

/// One `[[teams]]` entry. Array-of-tables order in the file is the order
/// teams are listed in the help message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub schedules: Vec<String>,
    pub business_hours: Option<String>,
}

impl BotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OncallError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| OncallError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values. Unset
    /// variables keep the placeholder so validation can reject them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.pagerduty.timeout_seconds.unwrap_or(10))
    }

    /// Builds the immutable roster directory, preserving team declaration
    /// order.
    pub fn directory(&self) -> Result<RosterDirectory> {
        let mut directory = RosterDirectory::new();
        let mut seen = HashSet::new();

        for team in &self.teams {
            let id = TeamId::normalize(&team.name);
            if !seen.insert(id.clone()) {
                return Err(OncallError::InvalidConfigValueError {
                    field: "teams.name".to_string(),
                    value: team.name.clone(),
                    reason: "Duplicate team name".to_string(),
                });
            }

            directory.insert(
                id,
                TeamRosterSet {
                    primary_chain: team
                        .schedules
                        .iter()
                        .map(|s| RosterRef::new(s.clone()))
                        .collect(),
                    business_hours: team
                        .business_hours
                        .as_ref()
                        .map(|s| RosterRef::new(s.clone())),
                },
            );
        }

        Ok(directory)
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.bind", &self.server.bind)?;
        validation::validate_url("pagerduty.api_base", &self.pagerduty.api_base)?;
        validation::validate_resolved_secret("pagerduty.token", &self.pagerduty.token)?;

        if let Some(timeout) = self.pagerduty.timeout_seconds {
            validation::validate_positive_number("pagerduty.timeout_seconds", timeout, 1)?;
        }

        for team in &self.teams {
            validation::validate_non_empty_string("teams.name", &team.name)?;
            if team.name.trim().eq_ignore_ascii_case("help") {
                // Would shadow the help flow
                return Err(OncallError::InvalidConfigValueError {
                    field: "teams.name".to_string(),
                    value: team.name.clone(),
                    reason: "`help` is a reserved keyword".to_string(),
                });
            }
            for schedule in &team.schedules {
                validation::validate_non_empty_string("teams.schedules", schedule)?;
            }
            if let Some(business_hours) = &team.business_hours {
                validation::validate_non_empty_string("teams.business_hours", business_hours)?;
            }
        }

        Ok(())
    }
}
