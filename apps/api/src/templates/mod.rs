//! Template rendering — tagged-variant dispatch over the known template
//! identifiers. Adding a variant means extending `TemplateId` and the match
//! in `render`, nothing else.

pub mod classic;
pub mod modern;

use serde::{Deserialize, Serialize};

use crate::presentation::CvDraft;

/// Identifier selecting a renderer variant. Unknown or absent identifiers
/// fall back to the default (`Modern`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Classic,
    #[default]
    Modern,
}

impl<'de> Deserialize<'de> for TemplateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "classic" => TemplateId::Classic,
            _ => TemplateId::default(),
        })
    }
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
        }
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "classic" => TemplateId::Classic,
            _ => TemplateId::default(),
        })
    }
}

/// Renders the draft into a standalone HTML page for the selected variant.
/// Pure: never mutates its input; every optional/empty region is simply
/// omitted from the output.
pub fn render(draft: &CvDraft, template: TemplateId) -> String {
    let body = match template {
        TemplateId::Classic => classic::render(draft),
        TemplateId::Modern => modern::render(draft),
    };

    // The container id is the DOM marker the headless renderer waits for
    // before capturing the page.
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n<div id=\"cv-preview-container\">\n{}\n</div>\n\
         </body>\n</html>\n",
        escape(draft.name.as_deref().unwrap_or("CV")),
        body
    )
}

/// Minimal HTML escaping for user-provided text.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Catalog entry served by `GET /api/templates`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub thumbnail: &'static str,
    pub category: &'static str,
    pub is_premium: bool,
}

/// The static template catalog shown on the template-picker step.
pub const CATALOG: &[TemplateInfo] = &[
    TemplateInfo {
        id: "modern-1",
        name: "Modern Professional",
        description: "Clean and modern design perfect for tech professionals",
        thumbnail: "/templates/modern-1.png",
        category: "modern",
        is_premium: false,
    },
    TemplateInfo {
        id: "classic-1",
        name: "Classic Executive",
        description: "Traditional layout ideal for corporate positions",
        thumbnail: "/templates/classic-1.png",
        category: "classic",
        is_premium: false,
    },
    TemplateInfo {
        id: "creative-1",
        name: "Creative Designer",
        description: "Bold and creative design for designers and artists",
        thumbnail: "/templates/creative-1.png",
        category: "creative",
        is_premium: true,
    },
    TemplateInfo {
        id: "minimal-1",
        name: "Minimal Elegance",
        description: "Minimalist design with maximum impact",
        thumbnail: "/templates/minimal-1.png",
        category: "minimal",
        is_premium: false,
    },
    TemplateInfo {
        id: "modern-2",
        name: "Tech Innovator",
        description: "Modern layout with tech-focused sections",
        thumbnail: "/templates/modern-2.png",
        category: "modern",
        is_premium: true,
    },
    TemplateInfo {
        id: "creative-2",
        name: "Portfolio Showcase",
        description: "Perfect for showcasing creative work and projects",
        thumbnail: "/templates/creative-2.png",
        category: "creative",
        is_premium: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::CvDraft;

    #[test]
    fn unknown_identifier_falls_back_to_default() {
        let id: TemplateId = serde_json::from_str("\"vaporwave\"").unwrap();
        assert_eq!(id, TemplateId::Modern);
        assert_eq!("classic".parse::<TemplateId>().unwrap(), TemplateId::Classic);
    }

    #[test]
    fn render_tolerates_fully_empty_draft() {
        let draft = CvDraft::default();
        for template in [TemplateId::Classic, TemplateId::Modern] {
            let html = render(&draft, template);
            assert!(html.contains("cv-preview-container"));
        }
    }

    #[test]
    fn render_escapes_user_text() {
        let mut draft = CvDraft::default();
        draft.personal_info.name = "<script>alert(1)</script>".into();
        let html = render(&draft, TemplateId::Modern);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
