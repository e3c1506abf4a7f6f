//! Team member and skill models.

use serde::{Deserialize, Serialize};

/// Default cap on concurrent projects when a member record omits it.
pub const DEFAULT_MAX_CONCURRENT_PROJECTS: u32 = 3;

fn default_max_concurrent_projects() -> u32 {
    DEFAULT_MAX_CONCURRENT_PROJECTS
}

/// A skill that phases can require and members can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique identifier for the skill.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A person whose capacity is being planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique identifier for the member.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Country whose holiday calendar applies; falls back to the default
    /// country from settings when absent.
    #[serde(default)]
    pub country_id: Option<String>,
    /// Skills the member holds.
    #[serde(default)]
    pub skill_ids: Vec<String>,
    /// Number of projects the member can work on in one quarter.
    #[serde(default = "default_max_concurrent_projects")]
    pub max_concurrent_projects: u32,
}

impl TeamMember {
    /// Returns true if the member holds the given skill.
    ///
    /// # Examples
    ///
    /// ```
    /// use capacity_engine::models::TeamMember;
    ///
    /// let member = TeamMember {
    ///     id: "m-1".to_string(),
    ///     name: "Sanne".to_string(),
    ///     country_id: Some("nl".to_string()),
    ///     skill_ids: vec!["rust".to_string()],
    ///     max_concurrent_projects: 2,
    /// };
    /// assert!(member.has_skill("rust"));
    /// assert!(!member.has_skill("design"));
    /// ```
    pub fn has_skill(&self, skill_id: &str) -> bool {
        self.skill_ids.iter().any(|s| s == skill_id)
    }

    /// Returns the subset of `required` the member does not hold, in order.
    pub fn missing_skills<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|skill| !self.has_skill(skill))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_member_with_defaults() {
        let json = r#"{"id": "m-1", "name": "Sanne"}"#;
        let member: TeamMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.country_id, None);
        assert!(member.skill_ids.is_empty());
        assert_eq!(member.max_concurrent_projects, DEFAULT_MAX_CONCURRENT_PROJECTS);
    }

    #[test]
    fn test_deserialize_full_member() {
        let json = r#"{
            "id": "m-2",
            "name": "Oliver",
            "country_id": "gb",
            "skill_ids": ["backend", "rust"],
            "max_concurrent_projects": 2
        }"#;
        let member: TeamMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.country_id.as_deref(), Some("gb"));
        assert_eq!(member.max_concurrent_projects, 2);
        assert!(member.has_skill("backend"));
    }

    #[test]
    fn test_missing_skills_preserves_order() {
        let member = TeamMember {
            id: "m-1".to_string(),
            name: "Sanne".to_string(),
            country_id: None,
            skill_ids: vec!["rust".to_string()],
            max_concurrent_projects: 2,
        };
        let required = vec![
            "design".to_string(),
            "rust".to_string(),
            "sql".to_string(),
        ];
        assert_eq!(member.missing_skills(&required), vec!["design", "sql"]);
        assert!(member.missing_skills(&[]).is_empty());
    }
}
