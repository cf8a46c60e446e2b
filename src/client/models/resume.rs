//! Resume generation models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the resume generator needs beyond the stored profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub experience: Vec<ResumeExperience>,
    #[serde(default)]
    pub education: Vec<ResumeEducation>,
    #[serde(default)]
    pub projects: Vec<ResumeProject>,
    #[serde(default)]
    pub certifications: Vec<ResumeCertification>,
}

impl ResumeRequest {
    /// Drop blank entries the way the form does before submitting.
    pub fn compact(mut self) -> Self {
        self.experience.retain(|e| !e.company.trim().is_empty());
        self.education.retain(|e| !e.institution.trim().is_empty());
        self.projects.retain(|p| !p.name.trim().is_empty());
        self.certifications.retain(|c| !c.name.trim().is_empty());
        for exp in &mut self.experience {
            exp.highlights.retain(|h| !h.trim().is_empty());
        }
        for project in &mut self.projects {
            project.highlights.retain(|h| !h.trim().is_empty());
            project.technologies.retain(|t| !t.trim().is_empty());
        }
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "startDate")]
    pub start_date: String,
    #[serde(default, rename = "endDate")]
    pub end_date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeEducation {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default, rename = "startDate")]
    pub start_date: String,
    #[serde(default, rename = "endDate")]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeCertification {
    #[serde(default)]
    pub name: String,
}

/// Generator response; only the download link is interpreted
#[derive(Debug, Clone, Serialize)]
pub struct ResumeResponse {
    pub url: Option<String>,
    pub raw: Value,
}

impl ResumeResponse {
    /// Pick the download link from the places generators put it.
    pub fn from_value(raw: Value) -> Self {
        let candidates = [
            raw.pointer("/data/file_url"),
            raw.pointer("/data/url"),
            raw.get("url"),
            raw.get("resumeUrl"),
        ];
        let url = candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
            .map(str::to_string);

        Self { url, raw }
    }
}
