use crate::models::cv::CvDocument;

pub const CAREER_ADVISOR_SYSTEM: &str = "You are an expert Career Advisor AI. \
    You analyze structured CV data and produce actionable, realistic career guidance. \
    Keep the tone professional yet encouraging. \
    Respond in Markdown only.";

/// Builds the career-path prompt from the document's skills, experience,
/// education, projects and summary. The prompt carries a JSON snapshot so
/// the model sees the same structure the templates render.
pub fn build_career_path_prompt(doc: &CvDocument) -> String {
    let cv_context = serde_json::json!({
        "skills": doc.skills,
        "experience": doc.experience,
        "education": doc.education,
        "projects": doc.projects,
        "summary": doc.personal_info.summary,
        "jobTitle": doc.personal_info.job_title,
    });

    format!(
        "Analyze the following CV data provided in JSON format:\n\
         {cv_context}\n\n\
         Based on this data, generate a comprehensive Career Path Plan.\n\
         The response MUST be in Markdown format.\n\
         Include:\n\
         1. **Current Profile Analysis**: Strengths and key skills.\n\
         2. **Recommended Roles**: Job titles to target now and in the future.\n\
         3. **Gap Analysis**: Missing skills or areas for improvement.\n\
         4. **5-Year Career Roadmap**: Year-by-year actionable steps.\n\
         5. **Learning Path**: Specific technologies or certifications to acquire.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::SkillGroup;

    #[test]
    fn prompt_carries_profile_fields_but_not_contact_details() {
        let mut doc = CvDocument::placeholder("Grace Hopper", "grace@example.com");
        doc.personal_info.job_title = Some("Engineer".into());
        doc.skills = vec![SkillGroup {
            category: "General".into(),
            skills: vec!["Rust".into()],
        }];

        let prompt = build_career_path_prompt(&doc);
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("Engineer"));
        // Contact details are not part of the advisory context.
        assert!(!prompt.contains("grace@example.com"));
    }
}
