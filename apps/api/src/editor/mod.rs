#![allow(dead_code)]

//! Editor session — the single mutable draft behind the multi-step wizard.
//!
//! Every draft-changing operation hands a fresh snapshot to the autosave
//! coordinator when one is attached. Without an authentication context the
//! draft still mutates; it just never persists.

pub mod autosave;

use crate::editor::autosave::AutosaveCoordinator;
use crate::presentation::{CvDraft, DraftEducation, DraftExperience, DraftProject};
use crate::templates::TemplateId;

/// Wizard steps, in order. Pure UI state: the index gates which fields are
/// visible, nothing else.
pub const STEPS: &[&str] = &[
    "personal-info",
    "template",
    "profile",
    "experience",
    "education",
    "skills",
    "projects",
    "ai-suggestions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Projects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    JobTitle,
    Phone,
    Email,
    Linkedin,
    AvatarUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    JobTitle,
    Company,
    Date,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Degree,
    School,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Description,
}

pub struct EditorSession {
    draft: CvDraft,
    step: usize,
    autosave: Option<AutosaveCoordinator>,
}

impl EditorSession {
    /// `autosave` is `None` when there is no active authentication context.
    pub fn new(draft: CvDraft, autosave: Option<AutosaveCoordinator>) -> Self {
        Self {
            draft,
            step: 0,
            autosave,
        }
    }

    pub fn draft(&self) -> &CvDraft {
        &self.draft
    }

    pub fn step(&self) -> usize {
        self.step
    }

    fn touch(&self) {
        if let Some(autosave) = &self.autosave {
            autosave.enqueue(&self.draft);
        }
    }

    pub fn set_personal_field(&mut self, field: PersonalField, value: &str) {
        let info = &mut self.draft.personal_info;
        let slot = match field {
            PersonalField::Name => &mut info.name,
            PersonalField::JobTitle => &mut info.job_title,
            PersonalField::Phone => &mut info.phone,
            PersonalField::Email => &mut info.email,
            PersonalField::Linkedin => &mut info.linkedin,
            PersonalField::AvatarUrl => &mut info.avatar_url,
        };
        *slot = value.to_string();
        self.touch();
    }

    pub fn set_profile(&mut self, value: &str) {
        self.draft.profile = value.to_string();
        self.touch();
    }

    pub fn set_skills(&mut self, value: &str) {
        self.draft.skills = value.to_string();
        self.touch();
    }

    pub fn set_template(&mut self, template: TemplateId) {
        self.draft.template = template;
        self.touch();
    }

    /// Appends a blank record of the right shape: every field starts as an
    /// empty string.
    pub fn add_item(&mut self, section: Section) {
        match section {
            Section::Experience => self.draft.experience.push(DraftExperience::default()),
            Section::Education => self.draft.education.push(DraftEducation::default()),
            Section::Projects => self.draft.projects.push(DraftProject::default()),
        }
        self.touch();
    }

    pub fn set_experience_field(&mut self, index: usize, field: ExperienceField, value: &str) {
        let Some(item) = self.draft.experience.get_mut(index) else {
            return; // out of bounds: no-op
        };
        let slot = match field {
            ExperienceField::JobTitle => &mut item.job_title,
            ExperienceField::Company => &mut item.company,
            ExperienceField::Date => &mut item.date,
            ExperienceField::Description => &mut item.description,
        };
        *slot = value.to_string();
        self.touch();
    }

    pub fn set_education_field(&mut self, index: usize, field: EducationField, value: &str) {
        let Some(item) = self.draft.education.get_mut(index) else {
            return;
        };
        let slot = match field {
            EducationField::Degree => &mut item.degree,
            EducationField::School => &mut item.school,
            EducationField::Date => &mut item.date,
        };
        *slot = value.to_string();
        self.touch();
    }

    pub fn set_project_field(&mut self, index: usize, field: ProjectField, value: &str) {
        let Some(item) = self.draft.projects.get_mut(index) else {
            return;
        };
        let slot = match field {
            ProjectField::Name => &mut item.name,
            ProjectField::Description => &mut item.description,
        };
        *slot = value.to_string();
        self.touch();
    }

    /// Removes one entry, preserving the relative order of the rest.
    /// Out-of-range indices leave the list unchanged.
    pub fn remove_item(&mut self, section: Section, index: usize) {
        let removed = match section {
            Section::Experience if index < self.draft.experience.len() => {
                self.draft.experience.remove(index);
                true
            }
            Section::Education if index < self.draft.education.len() => {
                self.draft.education.remove(index);
                true
            }
            Section::Projects if index < self.draft.projects.len() => {
                self.draft.projects.remove(index);
                true
            }
            _ => false,
        };
        if removed {
            self.touch();
        }
    }

    pub fn next_step(&mut self) {
        if self.step < STEPS.len() - 1 {
            self.step += 1;
        }
    }

    pub fn prev_step(&mut self) {
        if self.step > 0 {
            self.step -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::autosave::DraftPersister;
    use crate::models::cv::CvPatch;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use uuid::Uuid;

    fn session() -> EditorSession {
        EditorSession::new(CvDraft::default(), None)
    }

    #[test]
    fn scalar_and_nested_field_updates() {
        let mut session = session();
        session.set_personal_field(PersonalField::Name, "Ada");
        session.set_profile("Analytical engines.");
        session.set_skills("Math, Punch cards");

        assert_eq!(session.draft().personal_info.name, "Ada");
        assert_eq!(session.draft().profile, "Analytical engines.");
        assert_eq!(session.draft().skills, "Math, Punch cards");
    }

    #[test]
    fn add_item_appends_blank_records() {
        let mut session = session();
        session.add_item(Section::Experience);
        session.add_item(Section::Education);
        session.add_item(Section::Projects);

        assert_eq!(session.draft().experience[0], DraftExperience::default());
        assert_eq!(session.draft().education[0], DraftEducation::default());
        assert_eq!(session.draft().projects[0], DraftProject::default());
    }

    #[test]
    fn item_field_update_out_of_bounds_is_noop() {
        let mut session = session();
        session.add_item(Section::Experience);
        session.set_experience_field(0, ExperienceField::Company, "Initech");
        session.set_experience_field(5, ExperienceField::Company, "Ghost Corp");

        assert_eq!(session.draft().experience.len(), 1);
        assert_eq!(session.draft().experience[0].company, "Initech");
    }

    #[test]
    fn removal_preserves_relative_order() {
        let mut session = session();
        for name in ["a", "b", "c"] {
            session.add_item(Section::Projects);
            let idx = session.draft().projects.len() - 1;
            session.set_project_field(idx, ProjectField::Name, name);
        }

        session.remove_item(Section::Projects, 1);
        let names: Vec<&str> = session
            .draft()
            .projects
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "c"]);

        // Out-of-range removal changes nothing.
        session.remove_item(Section::Projects, 7);
        assert_eq!(session.draft().projects.len(), 2);
    }

    #[test]
    fn step_navigation_is_bounded() {
        let mut session = session();
        session.prev_step();
        assert_eq!(session.step(), 0);

        for _ in 0..STEPS.len() + 3 {
            session.next_step();
        }
        assert_eq!(session.step(), STEPS.len() - 1);
    }

    #[derive(Default)]
    struct CountingPersister {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl DraftPersister for CountingPersister {
        async fn persist(&self, _cv_id: Uuid, _patch: CvPatch) -> anyhow::Result<()> {
            *self.calls.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mutations_enqueue_snapshots_when_authenticated() {
        let persister = Arc::new(CountingPersister::default());
        let autosave = AutosaveCoordinator::new(Uuid::new_v4(), persister.clone());
        let mut session = EditorSession::new(CvDraft::default(), Some(autosave));

        session.set_personal_field(PersonalField::Name, "Ada");
        session.add_item(Section::Education);
        session.set_education_field(0, EducationField::School, "Somerville");

        tokio::time::sleep(Duration::from_millis(1100)).await;
        // Three edits inside one quiet window: exactly one persist.
        assert_eq!(*persister.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn without_auth_context_draft_updates_but_nothing_persists() {
        let mut session = EditorSession::new(CvDraft::default(), None);
        session.set_profile("still editable");
        assert_eq!(session.draft().profile, "still editable");
    }
}
