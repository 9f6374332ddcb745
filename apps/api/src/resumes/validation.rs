use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, DEFAULT_TITLE, SUMMARY_MAX_CHARS};

/// Checks a document before it is saved. Returns one message per problem.
///
/// Rejected:
/// - blank or missing `firstName`, `lastName`, `email`
/// - `summary` longer than 500 characters
/// - an education entry without a `startDate`
pub fn validate_document(doc: &ResumeDocument) -> Vec<String> {
    let mut problems = Vec::new();
    let info = &doc.personal_info;

    for (field, value) in [
        ("firstName", &info.first_name),
        ("lastName", &info.last_name),
        ("email", &info.email),
    ] {
        if value.as_deref().map(str::trim).unwrap_or("").is_empty() {
            problems.push(format!("personalInfo.{field} is required"));
        }
    }

    if let Some(summary) = &info.summary {
        let len = summary.chars().count();
        if len > SUMMARY_MAX_CHARS {
            problems.push(format!(
                "personalInfo.summary must be at most {SUMMARY_MAX_CHARS} characters (got {len})"
            ));
        }
    }

    for (i, edu) in doc.education.iter().enumerate() {
        if edu.start_date.trim().is_empty() {
            problems.push(format!("education[{i}].startDate is required"));
        }
    }

    problems
}

/// Normalizes a client-supplied document and validates it.
///
/// Store-maintained timestamps are discarded and a blank title falls back to
/// the default.
pub fn prepare_for_save(mut doc: ResumeDocument) -> Result<ResumeDocument, AppError> {
    doc.created_at = None;
    doc.last_modified = None;
    if doc.title.trim().is_empty() {
        doc.title = DEFAULT_TITLE.to_string();
    }

    let problems = validate_document(&doc);
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, PersonalInfo};

    fn valid_doc() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                first_name: Some("Linus".to_string()),
                last_name: Some("Torvalds".to_string()),
                email: Some("linus@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_document_has_no_problems() {
        assert!(validate_document(&valid_doc()).is_empty());
    }

    #[test]
    fn test_missing_required_fields_reported_individually() {
        let mut doc = valid_doc();
        doc.personal_info.first_name = None;
        doc.personal_info.email = Some(" ".to_string());
        let problems = validate_document(&doc);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("firstName"));
        assert!(problems[1].contains("email"));
    }

    #[test]
    fn test_summary_length_counts_characters_not_bytes() {
        let mut doc = valid_doc();
        doc.personal_info.summary = Some("é".repeat(SUMMARY_MAX_CHARS));
        assert!(validate_document(&doc).is_empty());

        doc.personal_info.summary = Some("a".repeat(SUMMARY_MAX_CHARS + 1));
        let problems = validate_document(&doc);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("summary"));
    }

    #[test]
    fn test_education_requires_start_date() {
        let mut doc = valid_doc();
        doc.education = vec![Education {
            institution: "Helsinki".to_string(),
            degree: "MSc".to_string(),
            field: "CS".to_string(),
            start_date: String::new(),
            end_date: None,
            gpa: None,
            description: None,
        }];
        let problems = validate_document(&doc);
        assert_eq!(problems, vec!["education[0].startDate is required".to_string()]);
    }

    #[test]
    fn test_prepare_for_save_defaults_title_and_drops_timestamps() {
        let mut doc = valid_doc();
        doc.title = "  ".to_string();
        doc.created_at = Some(chrono::Utc::now());
        let prepared = prepare_for_save(doc).unwrap();
        assert_eq!(prepared.title, DEFAULT_TITLE);
        assert!(prepared.created_at.is_none());
    }

    #[test]
    fn test_prepare_for_save_rejects_invalid() {
        let mut doc = valid_doc();
        doc.personal_info.last_name = None;
        assert!(matches!(prepare_for_save(doc), Err(AppError::Validation(_))));
    }
}
