//! CV CRUD gateway — owner-scoped create/read/update/delete/list over the
//! document store, plus the server-rendered preview the PDF exporter
//! captures.

pub mod handlers;

use crate::errors::AppError;
use crate::models::cv::CvPatch;

/// Create-time validation: a document is never written without a non-empty
/// full name and email.
pub fn validate_required_fields(patch: &CvPatch) -> Result<(), AppError> {
    let ok = patch
        .personal_info
        .as_ref()
        .map(|info| !info.full_name.trim().is_empty() && !info.email.trim().is_empty())
        .unwrap_or(false);

    if ok {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Personal information (name and email) is required".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::PersonalInfo;

    #[test]
    fn rejects_missing_and_blank_required_fields() {
        assert!(validate_required_fields(&CvPatch::default()).is_err());

        let patch = CvPatch {
            personal_info: Some(PersonalInfo {
                full_name: "  ".into(),
                email: "ada@example.com".into(),
                ..PersonalInfo::default()
            }),
            ..CvPatch::default()
        };
        assert!(validate_required_fields(&patch).is_err());
    }

    #[test]
    fn accepts_populated_required_fields() {
        let patch = CvPatch {
            personal_info: Some(PersonalInfo {
                full_name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                ..PersonalInfo::default()
            }),
            ..CvPatch::default()
        };
        assert!(validate_required_fields(&patch).is_ok());
    }
}
