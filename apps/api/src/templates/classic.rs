//! Classic layout — two-column page with contact details and education in
//! the sidebar, profile/experience/projects in the main column.

use crate::presentation::CvDraft;
use crate::templates::escape;

pub fn render(draft: &CvDraft) -> String {
    let info = &draft.personal_info;
    let mut html = String::new();

    html.push_str("<div class=\"cv classic\">\n");

    html.push_str("<header>\n");
    if !info.name.is_empty() {
        html.push_str(&format!("<h1>{}</h1>\n", escape(&info.name)));
    }
    if !info.job_title.is_empty() {
        html.push_str(&format!("<p class=\"job-title\">{}</p>\n", escape(&info.job_title)));
    }
    if !info.avatar_url.is_empty() {
        html.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">\n",
            escape(&info.avatar_url),
            escape(&info.name)
        ));
    }
    html.push_str("</header>\n");

    html.push_str("<aside>\n");
    let mut contact = String::new();
    for (class, value) in [
        ("email", &info.email),
        ("phone", &info.phone),
        ("linkedin", &info.linkedin),
    ] {
        if !value.is_empty() {
            contact.push_str(&format!("<li class=\"{class}\">{}</li>\n", escape(value)));
        }
    }
    if !contact.is_empty() {
        html.push_str(&format!(
            "<section class=\"contact\"><h2>Contact</h2>\n<ul>\n{contact}</ul></section>\n"
        ));
    }

    if !draft.education.is_empty() {
        html.push_str("<section class=\"education\"><h2>Education</h2>\n");
        for edu in &draft.education {
            html.push_str("<article>\n");
            if !edu.degree.is_empty() {
                html.push_str(&format!("<h3>{}</h3>\n", escape(&edu.degree)));
            }
            if !edu.school.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape(&edu.school)));
            }
            if !edu.date.is_empty() {
                html.push_str(&format!("<p class=\"date\">{}</p>\n", escape(&edu.date)));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }

    if !draft.skills.is_empty() {
        html.push_str(&format!(
            "<section class=\"skills\"><h2>Skills</h2>\n<p>{}</p></section>\n",
            escape(&draft.skills)
        ));
    }
    html.push_str("</aside>\n");

    html.push_str("<main>\n");
    if !draft.profile.is_empty() {
        html.push_str(&format!(
            "<section class=\"profile\"><h2>Profile</h2>\n<p>{}</p></section>\n",
            escape(&draft.profile)
        ));
    }

    if !draft.experience.is_empty() {
        html.push_str("<section class=\"experience\"><h2>Work Experience</h2>\n");
        for exp in &draft.experience {
            html.push_str("<article>\n");
            if !exp.job_title.is_empty() {
                html.push_str(&format!("<h3>{}</h3>\n", escape(&exp.job_title)));
            }
            if !exp.company.is_empty() {
                html.push_str(&format!("<p class=\"company\">{}</p>\n", escape(&exp.company)));
            }
            if !exp.date.is_empty() {
                html.push_str(&format!("<p class=\"date\">{}</p>\n", escape(&exp.date)));
            }
            if !exp.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape(&exp.description)));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }

    if !draft.projects.is_empty() {
        html.push_str("<section class=\"projects\"><h2>Projects</h2>\n");
        for project in &draft.projects {
            html.push_str("<article>\n");
            if !project.name.is_empty() {
                html.push_str(&format!("<h3>{}</h3>\n", escape(&project.name)));
            }
            if !project.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape(&project.description)));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }
    html.push_str("</main>\n");

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{DraftEducation, DraftExperience};

    #[test]
    fn empty_sections_render_nothing() {
        let html = render(&CvDraft::default());
        assert!(!html.contains("<section"));
    }

    #[test]
    fn populated_sections_appear_in_order() {
        let mut draft = CvDraft::default();
        draft.personal_info.name = "Grace Hopper".into();
        draft.education.push(DraftEducation {
            degree: "PhD Mathematics".into(),
            school: "Yale".into(),
            date: "1930 - 1934".into(),
        });
        draft.experience.push(DraftExperience {
            job_title: "Rear Admiral".into(),
            company: "US Navy".into(),
            date: "1943 - 1986".into(),
            description: "Invented the compiler.".into(),
        });

        let html = render(&draft);
        assert!(html.contains("Grace Hopper"));
        assert!(html.contains("PhD Mathematics"));
        assert!(html.find("Education").unwrap() < html.find("Work Experience").unwrap());
    }
}
