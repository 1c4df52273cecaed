//! Presentation mapper — the bidirectional bridge between the persisted
//! document and the flat, display-ready draft the editor and the template
//! renderers work with.
//!
//! `to_draft` is total, pure and deterministic. The inverse `to_patch` is
//! total as well but deliberately lossy: calendar dates survive as years
//! only, and skill categories collapse into a single synthetic group. The
//! one hard guarantee is that a round trip never corrupts the required
//! personal fields (full name, email).

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cv::{
    CvDocument, CvPatch, Education, Experience, PersonalInfo, Project, SkillGroup,
};
use crate::templates::TemplateId;

/// Category label applied when a flattened skill string is folded back
/// into the grouped document shape.
pub const SYNTHETIC_SKILL_CATEGORY: &str = "General";

/// Placeholder for the required `field` of an education entry, which the
/// draft shape does not carry.
const FIELD_PLACEHOLDER: &str = "Field";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftPersonalInfo {
    pub name: String,
    pub job_title: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftExperience {
    pub job_title: String,
    pub company: String,
    /// Display range, e.g. `"2021 - Present"` or `"2021"`.
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftEducation {
    pub degree: String,
    pub school: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftProject {
    pub name: String,
    pub description: String,
}

/// The derived, edit/display-oriented view of a document. Never persisted
/// directly; the document remains the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub template: TemplateId,
    pub personal_info: DraftPersonalInfo,
    /// Maps 1:1 to `personal_info.summary` on the document.
    pub profile: String,
    pub experience: Vec<DraftExperience>,
    pub education: Vec<DraftEducation>,
    /// Single comma-joined string; category boundaries are not recoverable.
    pub skills: String,
    pub projects: Vec<DraftProject>,
}

/// Maps a persisted document into the presentation shape.
pub fn to_draft(doc: &CvDocument) -> CvDraft {
    let info = &doc.personal_info;
    CvDraft {
        id: None,
        name: Some(if info.full_name.is_empty() {
            "Untitled CV".to_string()
        } else {
            info.full_name.clone()
        }),
        template: doc.template,
        personal_info: DraftPersonalInfo {
            name: info.full_name.clone(),
            job_title: info.job_title.clone().unwrap_or_default(),
            phone: info.phone.clone().unwrap_or_default(),
            email: info.email.clone(),
            linkedin: info.linkedin.clone().unwrap_or_default(),
            avatar_url: info.avatar_url.clone().unwrap_or_default(),
        },
        profile: info.summary.clone().unwrap_or_default(),
        experience: doc
            .experience
            .iter()
            .map(|exp| DraftExperience {
                job_title: exp.position.clone(),
                company: exp.company.clone(),
                date: format_range(Some(exp.start_date), exp.end_date, exp.current),
                description: exp.description.clone(),
            })
            .collect(),
        education: doc
            .education
            .iter()
            .map(|edu| DraftEducation {
                degree: edu.degree.clone(),
                school: edu.institution.clone(),
                date: format_range(Some(edu.start_date), edu.end_date, edu.current),
            })
            .collect(),
        skills: flatten_skills(&doc.skills),
        projects: doc
            .projects
            .iter()
            .map(|p| DraftProject {
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect(),
    }
}

/// Maps a draft back into a top-level document patch, stamping `now` into
/// every date slot the draft cannot resolve.
pub fn to_patch(draft: &CvDraft) -> CvPatch {
    to_patch_at(draft, Utc::now())
}

/// Deterministic core of `to_patch`; `now` is the lossy-default sentinel
/// for unparseable or absent dates.
pub fn to_patch_at(draft: &CvDraft, now: DateTime<Utc>) -> CvPatch {
    let info = &draft.personal_info;
    CvPatch {
        personal_info: Some(PersonalInfo {
            full_name: info.name.clone(),
            email: info.email.clone(),
            phone: non_empty(&info.phone),
            job_title: non_empty(&info.job_title),
            avatar_url: non_empty(&info.avatar_url),
            linkedin: non_empty(&info.linkedin),
            summary: non_empty(&draft.profile),
            ..PersonalInfo::default()
        }),
        experience: Some(
            draft
                .experience
                .iter()
                .map(|exp| {
                    let range = ParsedRange::parse(&exp.date, now);
                    Experience {
                        company: exp.company.clone(),
                        position: exp.job_title.clone(),
                        location: None,
                        start_date: range.start,
                        end_date: range.end,
                        current: range.current,
                        description: exp.description.clone(),
                        achievements: Vec::new(),
                    }
                })
                .collect(),
        ),
        education: Some(
            draft
                .education
                .iter()
                .map(|edu| {
                    let range = ParsedRange::parse(&edu.date, now);
                    Education {
                        institution: edu.school.clone(),
                        degree: edu.degree.clone(),
                        field: FIELD_PLACEHOLDER.to_string(),
                        start_date: range.start,
                        end_date: range.end,
                        current: range.current,
                        gpa: None,
                        description: None,
                    }
                })
                .collect(),
        ),
        skills: Some(unflatten_skills(&draft.skills)),
        projects: Some(
            draft
                .projects
                .iter()
                .map(|p| Project {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    technologies: Vec::new(),
                    url: None,
                    github: None,
                    start_date: Some(now),
                    end_date: None,
                })
                .collect(),
        ),
        certificates: None,
        languages: None,
        template: Some(draft.template),
    }
}

/// `"{startYear} - {endYear|Present}"`, the start year alone when no end is
/// resolvable, or an empty string when the start itself is absent.
pub fn format_range(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    current: bool,
) -> String {
    let start = match start {
        Some(d) => d.year().to_string(),
        None => String::new(),
    };
    let end = if current {
        "Present".to_string()
    } else {
        end.map(|d| d.year().to_string()).unwrap_or_default()
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, _) => String::new(),
    }
}

/// Per-group `", "` join, then the groups themselves joined with `", "`.
pub fn flatten_skills(groups: &[SkillGroup]) -> String {
    groups
        .iter()
        .map(|g| g.skills.join(", "))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Splits the flattened string on commas, trims, drops empties, and wraps
/// the result in one synthetic group. Prior categories are gone for good.
pub fn unflatten_skills(flat: &str) -> Vec<SkillGroup> {
    let skills: Vec<String> = flat
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if skills.is_empty() {
        return Vec::new();
    }
    vec![SkillGroup {
        category: SYNTHETIC_SKILL_CATEGORY.to_string(),
        skills,
    }]
}

struct ParsedRange {
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    current: bool,
}

impl ParsedRange {
    /// Splits a display range on `-`. First segment → start; second →
    /// end, unless it names "present", which sets `current` instead.
    fn parse(range: &str, now: DateTime<Utc>) -> Self {
        let current = range.to_lowercase().contains("present");
        let mut parts = range.splitn(2, '-');
        let start = parse_date_component(parts.next().unwrap_or(""), now);
        let end = if current {
            None
        } else {
            parts.next().and_then(|seg| {
                let seg = seg.trim();
                if seg.is_empty() {
                    None
                } else {
                    Some(parse_date_component(seg, now))
                }
            })
        };
        ParsedRange {
            start,
            end,
            current,
        }
    }
}

/// Resolves one segment of a display range to a concrete instant. A bare
/// 4-digit year becomes Jan 1 of that year; a full `YYYY-MM-DD` date is
/// taken as-is; anything else falls back to `now` (lossy by policy).
fn parse_date_component(segment: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let segment = segment.trim();

    if let Ok(year) = segment.parse::<i32>() {
        if (1000..=9999).contains(&year) {
            if let Some(date) = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single() {
                return date;
            }
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(segment, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Utc.from_utc_datetime(&midnight);
        }
    }

    now
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn sample_document() -> CvDocument {
        let mut doc = CvDocument::placeholder("Grace Hopper", "grace@example.com");
        doc.personal_info.summary = Some("Compiler pioneer.".into());
        doc.experience.push(Experience {
            company: "Navy".into(),
            position: "Rear Admiral".into(),
            location: None,
            start_date: date(2021, 9, 1),
            end_date: Some(date(2025, 5, 31)),
            current: false,
            description: "Led things.".into(),
            achievements: vec!["COBOL".into()],
        });
        doc.skills = vec![
            SkillGroup {
                category: "Frontend".into(),
                skills: vec!["React".into(), "Next.js".into()],
            },
            SkillGroup {
                category: "Backend".into(),
                skills: vec!["Node.js".into()],
            },
        ];
        doc
    }

    #[test]
    fn date_range_formats_start_and_end_years() {
        assert_eq!(
            format_range(Some(date(2021, 9, 1)), Some(date(2025, 5, 31)), false),
            "2021 - 2025"
        );
    }

    #[test]
    fn date_range_uses_present_when_current() {
        assert_eq!(
            format_range(Some(date(2019, 3, 14)), Some(date(2020, 1, 1)), true),
            "2019 - Present"
        );
    }

    #[test]
    fn date_range_start_only_and_empty() {
        assert_eq!(format_range(Some(date(2022, 6, 1)), None, false), "2022");
        assert_eq!(format_range(None, Some(date(2022, 6, 1)), false), "");
        assert_eq!(format_range(None, None, false), "");
    }

    #[test]
    fn skills_flatten_in_group_order() {
        let doc = sample_document();
        assert_eq!(flatten_skills(&doc.skills), "React, Next.js, Node.js");
    }

    #[test]
    fn skills_unflatten_into_single_synthetic_group() {
        let groups = unflatten_skills("React, Next.js, Node.js");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, SYNTHETIC_SKILL_CATEGORY);
        assert_eq!(groups[0].skills, vec!["React", "Next.js", "Node.js"]);
    }

    #[test]
    fn skills_unflatten_trims_and_drops_empties() {
        let groups = unflatten_skills("  Rust ,, Postgres ,  ");
        assert_eq!(groups[0].skills, vec!["Rust", "Postgres"]);
        assert!(unflatten_skills("  , ,").is_empty());
    }

    #[test]
    fn round_trip_preserves_required_personal_fields() {
        let doc = sample_document();
        let draft = to_draft(&doc);
        let patch = to_patch_at(&draft, date(2030, 1, 1));
        let restored = patch.apply(CvDocument::default());
        assert_eq!(restored.personal_info.full_name, "Grace Hopper");
        assert_eq!(restored.personal_info.email, "grace@example.com");
        assert_eq!(restored.personal_info.summary.as_deref(), Some("Compiler pioneer."));
    }

    #[test]
    fn round_trip_collapses_skill_categories() {
        let doc = sample_document();
        let draft = to_draft(&doc);
        let patch = to_patch_at(&draft, date(2030, 1, 1));
        let skills = patch.skills.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].category, SYNTHETIC_SKILL_CATEGORY);
        assert_eq!(skills[0].skills, vec!["React", "Next.js", "Node.js"]);
    }

    #[test]
    fn round_trip_reduces_dates_to_years() {
        let doc = sample_document();
        let draft = to_draft(&doc);
        assert_eq!(draft.experience[0].date, "2021 - 2025");

        let patch = to_patch_at(&draft, date(2030, 1, 1));
        let exp = &patch.experience.unwrap()[0];
        assert_eq!(exp.start_date, date(2021, 1, 1));
        assert_eq!(exp.end_date, Some(date(2025, 1, 1)));
        assert!(!exp.current);
    }

    #[test]
    fn present_range_sets_current_and_omits_end() {
        let now = date(2030, 1, 1);
        let range = ParsedRange::parse("2021 - Present", now);
        assert!(range.current);
        assert_eq!(range.start, date(2021, 1, 1));
        assert_eq!(range.end, None);

        // Case-insensitive.
        assert!(ParsedRange::parse("2021 - PRESENT", now).current);
    }

    #[test]
    fn unparseable_dates_fall_back_to_now() {
        let now = date(2030, 6, 15);
        let range = ParsedRange::parse("soonish", now);
        assert_eq!(range.start, now);
        assert_eq!(range.end, None);
        assert!(!range.current);
    }

    #[test]
    fn empty_document_maps_to_empty_draft() {
        let draft = to_draft(&CvDocument::default());
        assert_eq!(draft.skills, "");
        assert!(draft.experience.is_empty());
        assert_eq!(draft.name.as_deref(), Some("Untitled CV"));
    }
}
