#![allow(dead_code)]

//! Canonical persisted CV document — the source of truth. The presentation
//! shape in `crate::presentation` is a strictly derived, partially lossy view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::templates::TemplateId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: DateTime<Utc>,
    /// Ignored for display purposes whenever `current` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Skills are grouped by category, not kept as a flat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: String,
}

/// The full persisted document. All list sections tolerate absence on the
/// wire and default to empty; `template` falls back to the default variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDocument {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillGroup>,
    pub certificates: Vec<Certificate>,
    pub languages: Vec<LanguageSkill>,
    pub template: TemplateId,
}

impl CvDocument {
    /// Placeholder document used when a user requests a new CV.
    pub fn placeholder(full_name: &str, email: &str) -> Self {
        CvDocument {
            personal_info: PersonalInfo {
                full_name: full_name.to_string(),
                email: email.to_string(),
                ..PersonalInfo::default()
            },
            ..CvDocument::default()
        }
    }
}

/// A top-level partial document as accepted by `POST /api/cv` and
/// `PUT /api/cv/:id`. Merging replaces whole sections — nested arrays are
/// never merged element-wise.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvPatch {
    pub personal_info: Option<PersonalInfo>,
    pub education: Option<Vec<Education>>,
    pub experience: Option<Vec<Experience>>,
    pub projects: Option<Vec<Project>>,
    pub skills: Option<Vec<SkillGroup>>,
    pub certificates: Option<Vec<Certificate>>,
    pub languages: Option<Vec<LanguageSkill>>,
    pub template: Option<TemplateId>,
}

impl CvPatch {
    /// Applies this patch onto an existing document, top-level merge only.
    pub fn apply(self, mut doc: CvDocument) -> CvDocument {
        if let Some(personal_info) = self.personal_info {
            doc.personal_info = personal_info;
        }
        if let Some(education) = self.education {
            doc.education = education;
        }
        if let Some(experience) = self.experience {
            doc.experience = experience;
        }
        if let Some(projects) = self.projects {
            doc.projects = projects;
        }
        if let Some(skills) = self.skills {
            doc.skills = skills;
        }
        if let Some(certificates) = self.certificates {
            doc.certificates = certificates;
        }
        if let Some(languages) = self.languages {
            doc.languages = languages;
        }
        if let Some(template) = self.template {
            doc.template = template;
        }
        doc
    }

    /// Materializes a new document from the patch alone (create path).
    pub fn into_document(self) -> CvDocument {
        self.apply(CvDocument::default())
    }
}

/// A stored CV row: the document plus server-assigned identity, ownership
/// and timestamps. Timestamps are touched by the store on every write and
/// are non-decreasing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[serde(flatten)]
    pub document: CvDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_top_level_only() {
        let mut doc = CvDocument::placeholder("Ada Lovelace", "ada@example.com");
        doc.skills = vec![SkillGroup {
            category: "Frontend".into(),
            skills: vec!["React".into()],
        }];

        let patch = CvPatch {
            skills: Some(vec![SkillGroup {
                category: "Backend".into(),
                skills: vec!["Rust".into(), "Postgres".into()],
            }]),
            ..CvPatch::default()
        };

        let merged = patch.apply(doc);
        assert_eq!(merged.personal_info.full_name, "Ada Lovelace");
        assert_eq!(merged.skills.len(), 1);
        assert_eq!(merged.skills[0].category, "Backend");
    }

    #[test]
    fn document_deserializes_with_missing_sections() {
        let doc: CvDocument = serde_json::from_str(
            r#"{"personalInfo": {"fullName": "Ada", "email": "ada@example.com"}}"#,
        )
        .unwrap();
        assert!(doc.education.is_empty());
        assert!(doc.languages.is_empty());
        assert_eq!(doc.template, TemplateId::Modern);
    }
}
