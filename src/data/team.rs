//! Static team registry and sprite-to-team resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Team name returned for sprites no team claims.
pub const UNKNOWN_TEAM: &str = "unknown";

/// A named group of sprites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sprites: Vec<String>,
}

impl Team {
    pub fn new(name: &str, description: &str, sprites: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            sprites: sprites.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn contains(&self, sprite: &str) -> bool {
        self.sprites.iter().any(|s| s == sprite)
    }

    /// Label used by the team selector, e.g. "Dev - General purpose workspaces".
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        if self.description.is_empty() {
            capitalized
        } else {
            format!("{} - {}", capitalized, self.description)
        }
    }
}

/// Ordered set of teams, fixed for the lifetime of a session.
///
/// Declaration order matters: when a sprite is (mis)configured under more
/// than one team, the first team declared wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRegistry {
    teams: Vec<Team>,
}

impl Default for TeamRegistry {
    fn default() -> Self {
        Self::new(vec![
            Team::new(
                "agents",
                "Automated code review and synthesis",
                &[
                    "agents-review-claude-01",
                    "agents-review-codex-01",
                    "agents-synth-01",
                ],
            ),
            Team::new("dev", "General purpose workspaces", &["dev-workspace-01"]),
            Team::new(
                "infra",
                "Infrastructure and provisioning",
                &["infra-bootstrap-01"],
            ),
            Team::new(
                "mobile",
                "Distributed task execution",
                &[
                    "mobile-conductor-01",
                    "mobile-worker-01",
                    "mobile-worker-02",
                ],
            ),
        ])
    }
}

impl TeamRegistry {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Name of the first team listing `sprite`, or [`UNKNOWN_TEAM`].
    pub fn team_for_sprite(&self, sprite: &str) -> &str {
        self.teams
            .iter()
            .find(|t| t.contains(sprite))
            .map_or(UNKNOWN_TEAM, |t| t.name.as_str())
    }

    /// Sprites claimed by more than one team, with the claiming teams in
    /// declaration order.
    pub fn duplicate_members(&self) -> Vec<(String, Vec<String>)> {
        let mut claims: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for team in &self.teams {
            for sprite in &team.sprites {
                let owners = claims.entry(sprite.as_str()).or_default();
                if !owners.contains(&team.name) {
                    owners.push(team.name.clone());
                }
            }
        }

        claims
            .into_iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(sprite, owners)| (sprite.to_string(), owners))
            .collect()
    }
}
