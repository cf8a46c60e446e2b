//! Project and project-application models

use serde::{Deserialize, Serialize};

/// Project listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub company_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_id: Option<u64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub team_size: String,
    #[serde(default)]
    pub location: String,
}

/// Project posted by a company
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub team_size: String,
    #[serde(default)]
    pub location: String,
}

/// A student's application to a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectApplication {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_title: String,
    #[serde(default)]
    pub github_repo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_tolerates_missing_fields() {
        let project: Project = serde_json::from_str(r#"{"id": 9, "title": "Chat bot"}"#).unwrap();
        assert_eq!(project.id, 9);
        assert_eq!(project.title, "Chat bot");
        assert!(project.deadline.is_none());
    }

    #[test]
    fn test_application_from_gorm_shape() {
        let app: ProjectApplication = serde_json::from_str(
            r#"{"ID": 4, "student_id": 3, "project_id": 42, "status": "pending", "CreatedAt": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(app.id, 4);
        assert_eq!(app.project_id, 42);
        assert_eq!(app.status, "pending");
    }
}
