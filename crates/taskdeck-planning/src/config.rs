//! Planning configuration
//!
//! The analysis request carries a team-capacity roster and sprint
//! constants. These are configuration data, not computed values; the
//! defaults here match the demo team the product ships with, and a
//! deployment overrides them from a TOML file.

use serde::{Deserialize, Serialize};

use crate::error::PlanningError;

/// One team member's capacity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Display name, also used as the assignee key
    pub name: String,
    /// Hours available per week
    pub weekly_capacity: u32,
    /// Relative throughput against the team baseline
    pub velocity_multiplier: f64,
}

impl TeamMember {
    /// Create a roster entry
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, weekly_capacity: u32, velocity_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            weekly_capacity,
            velocity_multiplier,
        }
    }
}

/// Roster and sprint constants attached to every analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Team capacity roster
    pub team: Vec<TeamMember>,
    /// Sprint length in days
    pub sprint_length_days: u32,
    /// Completed points per sprint, oldest first
    pub velocity_history: Vec<u32>,
    /// Assignee suggested when a task has none
    pub default_assignee: String,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            team: vec![
                TeamMember::new("Sarah Johnson", 40, 1.2),
                TeamMember::new("Mike Chen", 40, 1.0),
                TeamMember::new("Alex Rodriguez", 32, 0.9),
                TeamMember::new("Emily Davis", 40, 1.1),
            ],
            sprint_length_days: 14,
            velocity_history: vec![21, 24, 19],
            default_assignee: "Sarah Johnson".to_string(),
        }
    }
}

impl PlanningConfig {
    /// Create the default roster
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the roster from a TOML string; missing keys take defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, PlanningError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load the roster from a TOML file
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, PlanningError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// With a replacement roster
    #[inline]
    #[must_use]
    pub fn with_team(mut self, team: Vec<TeamMember>) -> Self {
        self.team = team;
        self
    }

    /// With a different default assignee
    #[inline]
    #[must_use]
    pub fn with_default_assignee(mut self, name: impl Into<String>) -> Self {
        self.default_assignee = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_includes_the_default_assignee() {
        let config = PlanningConfig::default();
        assert!(config
            .team
            .iter()
            .any(|member| member.name == config.default_assignee));
        assert_eq!(config.sprint_length_days, 14);
    }

    #[test]
    fn roster_loads_from_toml() {
        let config = PlanningConfig::from_toml_str(
            r#"
            sprint_length_days = 7
            default_assignee = "Mike Chen"

            [[team]]
            name = "Mike Chen"
            weekly_capacity = 36
            velocity_multiplier = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.sprint_length_days, 7);
        assert_eq!(config.team.len(), 1);
        assert_eq!(config.team[0].weekly_capacity, 36);
        // unset keys keep their defaults
        assert_eq!(config.velocity_history, vec![21, 24, 19]);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = PlanningConfig::from_toml_str("team = 3").unwrap_err();
        assert!(matches!(err, PlanningError::ConfigParse(_)));
    }
}
