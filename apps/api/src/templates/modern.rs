//! Modern layout — single-column banner header, skills rendered as chips.
//! Default variant when no template is selected.

use crate::presentation::CvDraft;
use crate::templates::escape;

pub fn render(draft: &CvDraft) -> String {
    let info = &draft.personal_info;
    let mut html = String::new();

    html.push_str("<div class=\"cv modern\">\n");

    html.push_str("<header class=\"banner\">\n");
    if !info.avatar_url.is_empty() {
        html.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">\n",
            escape(&info.avatar_url),
            escape(&info.name)
        ));
    }
    if !info.name.is_empty() {
        html.push_str(&format!("<h1>{}</h1>\n", escape(&info.name)));
    }
    if !info.job_title.is_empty() {
        html.push_str(&format!("<p class=\"job-title\">{}</p>\n", escape(&info.job_title)));
    }
    let contact: Vec<String> = [&info.email, &info.phone, &info.linkedin]
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(|v| escape(v))
        .collect();
    if !contact.is_empty() {
        html.push_str(&format!("<p class=\"contact\">{}</p>\n", contact.join(" · ")));
    }
    html.push_str("</header>\n");

    if !draft.profile.is_empty() {
        html.push_str(&format!(
            "<section class=\"profile\"><h2>About Me</h2>\n<p>{}</p></section>\n",
            escape(&draft.profile)
        ));
    }

    if !draft.experience.is_empty() {
        html.push_str("<section class=\"experience\"><h2>Experience</h2>\n");
        for exp in &draft.experience {
            html.push_str("<article>\n<div class=\"heading\">\n");
            if !exp.job_title.is_empty() {
                html.push_str(&format!("<h3>{}</h3>\n", escape(&exp.job_title)));
            }
            if !exp.date.is_empty() {
                html.push_str(&format!("<span class=\"date\">{}</span>\n", escape(&exp.date)));
            }
            html.push_str("</div>\n");
            if !exp.company.is_empty() {
                html.push_str(&format!("<p class=\"company\">{}</p>\n", escape(&exp.company)));
            }
            if !exp.description.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape(&exp.description)));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
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
                html.push_str(&format!("<span class=\"date\">{}</span>\n", escape(&edu.date)));
            }
            html.push_str("</article>\n");
        }
        html.push_str("</section>\n");
    }

    if !draft.skills.is_empty() {
        let chips: String = draft
            .skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("<span class=\"chip\">{}</span>\n", escape(s)))
            .collect();
        html.push_str(&format!(
            "<section class=\"skills\"><h2>Skills</h2>\n{chips}</section>\n"
        ));
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

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_render_as_individual_chips() {
        let draft = CvDraft {
            skills: "Rust, Axum, Postgres".into(),
            ..CvDraft::default()
        };
        let html = render(&draft);
        assert_eq!(html.matches("class=\"chip\"").count(), 3);
    }

    #[test]
    fn empty_draft_renders_no_sections() {
        assert!(!render(&CvDraft::default()).contains("<section"));
    }
}
