//! Resume composer: walks a `ResumeDocument` and emits the draw-operation
//! stream for the one canonical resume layout.
//!
//! Section order is fixed. Each section is an independent guarded block that
//! emits nothing, header included, when it has no content. The `template`
//! field is not consulted.

use crate::models::resume::{
    Certification, Education, Experience, Language, PersonalInfo, Project, ResumeDocument, Skill,
};
use crate::render::font_metrics::FontFace;
use crate::render::layout::{Align, DrawOp};
use crate::render::RenderError;

pub const SUMMARY_TITLE: &str = "Professional Summary";
pub const EXPERIENCE_TITLE: &str = "Professional Experience";
pub const EDUCATION_TITLE: &str = "Education";
pub const SKILLS_TITLE: &str = "Skills";
pub const PROJECTS_TITLE: &str = "Projects";
pub const CERTIFICATIONS_TITLE: &str = "Certifications";
pub const LANGUAGES_TITLE: &str = "Languages";

const NAME_SIZE: f32 = 24.0;
const CONTACT_SIZE: f32 = 12.0;
const SECTION_SIZE: f32 = 14.0;
const ENTRY_TITLE_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const DETAIL_SIZE: f32 = 10.0;

const PRESENT: &str = "Present";

/// Builds the draw-operation stream for `doc`.
///
/// Fails only when `firstName`, `lastName` or `email` is missing or blank.
pub fn compose(doc: &ResumeDocument) -> Result<Vec<DrawOp>, RenderError> {
    let identity = Identity::from_personal_info(&doc.personal_info)?;
    let mut out = Composer::default();

    header(&mut out, &identity);
    contact(&mut out, &identity, &doc.personal_info);
    summary(&mut out, &doc.personal_info);
    experience(&mut out, &doc.experience);
    education(&mut out, &doc.education);
    skills(&mut out, &doc.skills);
    projects(&mut out, &doc.projects);
    certifications(&mut out, &doc.certifications);
    languages(&mut out, &doc.languages);

    Ok(out.ops)
}

// ────────────────────────────────────────────────────────────────────────────
// Required fields
// ────────────────────────────────────────────────────────────────────────────

struct Identity<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
}

impl<'a> Identity<'a> {
    fn from_personal_info(info: &'a PersonalInfo) -> Result<Self, RenderError> {
        Ok(Self {
            first_name: required(&info.first_name, "firstName")?,
            last_name: required(&info.last_name, "lastName")?,
            email: required(&info.email, "email")?,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, RenderError> {
    present(value).ok_or(RenderError::MalformedDocument { field })
}

/// The trimmed-nonblank view of an optional field.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Op builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Composer {
    ops: Vec<DrawOp>,
}

impl Composer {
    fn text(&mut self, face: FontFace, size: f32, align: Align, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            text,
            face,
            size,
            align,
        });
    }

    fn line(&mut self, face: FontFace, size: f32, text: impl Into<String>) {
        self.text(face, size, Align::Left, text);
    }

    fn centered(&mut self, face: FontFace, size: f32, text: impl Into<String>) {
        self.text(face, size, Align::Center, text);
    }

    fn move_down(&mut self, lines: f32) {
        self.ops.push(DrawOp::MoveDown { lines });
    }

    fn section_title(&mut self, title: &str) {
        self.line(FontFace::Bold, SECTION_SIZE, title);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn header(out: &mut Composer, id: &Identity<'_>) {
    out.centered(
        FontFace::Bold,
        NAME_SIZE,
        format!("{} {}", id.first_name, id.last_name),
    );
    out.move_down(0.5);
}

fn contact(out: &mut Composer, id: &Identity<'_>, info: &PersonalInfo) {
    out.centered(FontFace::Regular, CONTACT_SIZE, id.email);

    if let Some(phone) = present(&info.phone) {
        out.centered(FontFace::Regular, CONTACT_SIZE, phone);
    }

    if let Some(line) = address_line(info) {
        out.centered(FontFace::Regular, CONTACT_SIZE, line);
    }

    let links: Vec<&str> = [&info.linkedin, &info.github, &info.portfolio]
        .into_iter()
        .filter_map(present)
        .collect();
    if !links.is_empty() {
        out.centered(FontFace::Regular, CONTACT_SIZE, links.join(" | "));
    }

    out.move_down(1.0);
}

/// `address, city, state`, keyed on `address` being present. Missing city or
/// state are dropped from the line rather than printed empty.
fn address_line(info: &PersonalInfo) -> Option<String> {
    let address = present(&info.address)?;
    let parts: Vec<&str> = std::iter::once(address)
        .chain(present(&info.city))
        .chain(present(&info.state))
        .collect();
    Some(parts.join(", "))
}

fn summary(out: &mut Composer, info: &PersonalInfo) {
    let Some(summary) = present(&info.summary) else {
        return;
    };
    out.section_title(SUMMARY_TITLE);
    out.line(FontFace::Regular, BODY_SIZE, summary);
    out.move_down(1.0);
}

fn experience(out: &mut Composer, entries: &[Experience]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(EXPERIENCE_TITLE);
    out.move_down(0.5);

    for exp in entries {
        out.line(
            FontFace::Bold,
            ENTRY_TITLE_SIZE,
            format!("{} at {}", exp.position, exp.company),
        );
        out.line(FontFace::Oblique, DETAIL_SIZE, experience_dates(exp));
        out.line(FontFace::Regular, BODY_SIZE, exp.description.as_str());
        for achievement in exp.achievements.iter().filter(|a| !a.trim().is_empty()) {
            out.line(FontFace::Regular, DETAIL_SIZE, format!("• {achievement}"));
        }
        out.move_down(0.5);
    }
}

/// `current` wins over any `endDate`. Without either, only the start is shown.
fn experience_dates(exp: &Experience) -> String {
    if exp.current {
        return format!("{} - {PRESENT}", exp.start_date);
    }
    match present(&exp.end_date) {
        Some(end) => format!("{} - {end}", exp.start_date),
        None => exp.start_date.clone(),
    }
}

fn education(out: &mut Composer, entries: &[Education]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(EDUCATION_TITLE);
    out.move_down(0.5);

    for edu in entries {
        out.line(
            FontFace::Bold,
            ENTRY_TITLE_SIZE,
            format!("{} in {}", edu.degree, edu.field),
        );
        out.line(
            FontFace::Oblique,
            DETAIL_SIZE,
            format!(
                "{} - {} - {}",
                edu.institution,
                edu.start_date,
                present(&edu.end_date).unwrap_or(PRESENT)
            ),
        );
        if let Some(gpa) = present(&edu.gpa) {
            out.line(FontFace::Regular, DETAIL_SIZE, format!("GPA: {gpa}"));
        }
        if let Some(description) = present(&edu.description) {
            out.line(FontFace::Regular, DETAIL_SIZE, description);
        }
        out.move_down(0.5);
    }
}

fn skills(out: &mut Composer, entries: &[Skill]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(SKILLS_TITLE);
    out.move_down(0.5);
    out.line(FontFace::Regular, BODY_SIZE, skills_line(entries));
    out.move_down(1.0);
}

pub fn skills_line(entries: &[Skill]) -> String {
    entries
        .iter()
        .map(|s| format!("{} ({})", s.name, s.level.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn projects(out: &mut Composer, entries: &[Project]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(PROJECTS_TITLE);
    out.move_down(0.5);

    for project in entries {
        out.line(FontFace::Bold, ENTRY_TITLE_SIZE, project.name.as_str());
        out.line(FontFace::Regular, BODY_SIZE, project.description.as_str());
        if !project.technologies.is_empty() {
            out.line(
                FontFace::Oblique,
                DETAIL_SIZE,
                format!("Technologies: {}", project.technologies.join(", ")),
            );
        }
        out.move_down(0.5);
    }
}

fn certifications(out: &mut Composer, entries: &[Certification]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(CERTIFICATIONS_TITLE);
    out.move_down(0.5);

    for cert in entries {
        out.line(FontFace::Bold, ENTRY_TITLE_SIZE, cert.name.as_str());
        out.line(
            FontFace::Oblique,
            DETAIL_SIZE,
            format!("{} - {}", cert.issuer, cert.date),
        );
        if let Some(link) = present(&cert.link) {
            out.line(FontFace::Regular, DETAIL_SIZE, link);
        }
        out.move_down(0.5);
    }
}

fn languages(out: &mut Composer, entries: &[Language]) {
    if entries.is_empty() {
        return;
    }
    out.section_title(LANGUAGES_TITLE);
    out.move_down(0.5);
    let line = entries
        .iter()
        .map(|l| format!("{} ({})", l.name, l.proficiency.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    out.line(FontFace::Regular, BODY_SIZE, line);
    out.move_down(1.0);
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Proficiency, SkillLevel};

    const ALL_TITLES: [&str; 7] = [
        SUMMARY_TITLE,
        EXPERIENCE_TITLE,
        EDUCATION_TITLE,
        SKILLS_TITLE,
        PROJECTS_TITLE,
        CERTIFICATIONS_TITLE,
        LANGUAGES_TITLE,
    ];

    fn base_doc() -> ResumeDocument {
        ResumeDocument {
            personal_info: PersonalInfo {
                first_name: Some("Grace".to_string()),
                last_name: Some("Hopper".to_string()),
                email: Some("grace@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn experience_entry(current: bool, end: Option<&str>) -> Experience {
        Experience {
            company: "Navy".to_string(),
            position: "Rear Admiral".to_string(),
            start_date: "1943".to_string(),
            end_date: end.map(str::to_string),
            current,
            description: "Led compiler work.".to_string(),
            achievements: vec![],
        }
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::MoveDown { .. } => None,
            })
            .collect()
    }

    fn section_titles(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    text, face, size, ..
                } if *face == FontFace::Bold && *size == SECTION_SIZE => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_sections_emit_no_headers() {
        let ops = compose(&base_doc()).unwrap();
        let titles = section_titles(&ops);
        for title in ALL_TITLES {
            assert!(!titles.contains(&title), "unexpected header {title}");
        }
    }

    #[test]
    fn test_header_is_full_name_centered() {
        let ops = compose(&base_doc()).unwrap();
        match &ops[0] {
            DrawOp::Text {
                text,
                face,
                size,
                align,
            } => {
                assert_eq!(text, "Grace Hopper");
                assert_eq!(*face, FontFace::Bold);
                assert_eq!(*size, NAME_SIZE);
                assert_eq!(*align, Align::Center);
            }
            other => panic!("expected header text, got {other:?}"),
        }
    }

    #[test]
    fn test_current_role_renders_present_despite_end_date() {
        let mut doc = base_doc();
        doc.experience = vec![experience_entry(true, Some("1986"))];
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(t.contains(&"1943 - Present"));
        assert!(!t.iter().any(|s| s.contains("1986")));
    }

    #[test]
    fn test_past_role_renders_end_date() {
        let mut doc = base_doc();
        doc.experience = vec![experience_entry(false, Some("1986"))];
        let ops = compose(&doc).unwrap();
        assert!(texts(&ops).contains(&"1943 - 1986"));
    }

    #[test]
    fn test_skills_line_format() {
        let skills = vec![
            Skill {
                name: "Go".to_string(),
                level: SkillLevel::Expert,
                category: "Technical".to_string(),
            },
            Skill {
                name: "SQL".to_string(),
                level: SkillLevel::Intermediate,
                category: "Technical".to_string(),
            },
        ];
        assert_eq!(skills_line(&skills), "Go (Expert), SQL (Intermediate)");

        let mut doc = base_doc();
        doc.skills = skills;
        let ops = compose(&doc).unwrap();
        assert!(section_titles(&ops).contains(&SKILLS_TITLE));
        assert!(texts(&ops).contains(&"Go (Expert), SQL (Intermediate)"));
    }

    #[test]
    fn test_missing_email_is_malformed() {
        let mut doc = base_doc();
        doc.personal_info.email = None;
        match compose(&doc) {
            Err(RenderError::MalformedDocument { field }) => assert_eq!(field, "email"),
            other => panic!("expected MalformedDocument, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_last_name_is_malformed() {
        let mut doc = base_doc();
        doc.personal_info.last_name = Some("   ".to_string());
        assert!(matches!(
            compose(&doc),
            Err(RenderError::MalformedDocument { field: "lastName" })
        ));
    }

    #[test]
    fn test_optional_contact_lines_are_suppressed_individually() {
        let mut doc = base_doc();
        doc.personal_info.phone = Some("555-0100".to_string());
        let t = texts(&compose(&doc).unwrap()).join("\n");
        assert!(t.contains("555-0100"));
        assert!(!t.contains(", "));

        doc.personal_info.phone = None;
        doc.personal_info.address = Some("1 Main St".to_string());
        doc.personal_info.state = Some("VA".to_string());
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(t.contains(&"1 Main St, VA"));
        assert!(!t.contains(&"555-0100"));
    }

    #[test]
    fn test_city_without_address_prints_nothing() {
        let mut doc = base_doc();
        doc.personal_info.city = Some("Arlington".to_string());
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(!t.iter().any(|s| s.contains("Arlington")));
    }

    #[test]
    fn test_summary_section_included_only_when_non_empty() {
        let mut doc = base_doc();
        doc.personal_info.summary = Some("  ".to_string());
        assert!(!section_titles(&compose(&doc).unwrap()).contains(&SUMMARY_TITLE));

        doc.personal_info.summary = Some("Pioneer of programming languages.".to_string());
        let ops = compose(&doc).unwrap();
        assert!(section_titles(&ops).contains(&SUMMARY_TITLE));
        assert!(texts(&ops).contains(&"Pioneer of programming languages."));
    }

    #[test]
    fn test_achievements_are_bulleted() {
        let mut doc = base_doc();
        let mut exp = experience_entry(false, Some("1986"));
        exp.achievements = vec!["Built COBOL".to_string(), "Found a moth".to_string()];
        doc.experience = vec![exp];
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(t.contains(&"• Built COBOL"));
        assert!(t.contains(&"• Found a moth"));
        assert!(t.contains(&"Rear Admiral at Navy"));
    }

    #[test]
    fn test_education_defaults_end_to_present_and_gpa_is_optional() {
        let mut doc = base_doc();
        doc.education = vec![Education {
            institution: "Yale".to_string(),
            degree: "PhD".to_string(),
            field: "Mathematics".to_string(),
            start_date: "1930".to_string(),
            end_date: None,
            gpa: None,
            description: None,
        }];
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(t.contains(&"PhD in Mathematics"));
        assert!(t.contains(&"Yale - 1930 - Present"));
        assert!(!t.iter().any(|s| s.starts_with("GPA")));

        doc.education[0].gpa = Some("4.0".to_string());
        assert!(texts(&compose(&doc).unwrap()).contains(&"GPA: 4.0"));
    }

    #[test]
    fn test_links_joined_on_one_line() {
        let mut doc = base_doc();
        doc.personal_info.linkedin = Some("linkedin.com/in/ghopper".to_string());
        doc.personal_info.portfolio = Some("hopper.dev".to_string());
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(t.contains(&"linkedin.com/in/ghopper | hopper.dev"));
        assert!(!t.iter().any(|s| s.contains(" |  | ")));
    }

    #[test]
    fn test_education_description_follows_gpa() {
        let mut doc = base_doc();
        doc.education = vec![Education {
            institution: "Yale".to_string(),
            degree: "PhD".to_string(),
            field: "Mathematics".to_string(),
            start_date: "1930".to_string(),
            end_date: Some("1934".to_string()),
            gpa: Some("4.0".to_string()),
            description: Some("Thesis on irreducibility criteria.".to_string()),
        }];
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        let gpa = t.iter().position(|s| *s == "GPA: 4.0").unwrap();
        let description = t
            .iter()
            .position(|s| *s == "Thesis on irreducibility criteria.")
            .unwrap();
        assert_eq!(description, gpa + 1);
    }

    #[test]
    fn test_project_technologies_line_only_when_listed() {
        let mut doc = base_doc();
        doc.projects = vec![Project {
            name: "A-0".to_string(),
            description: "First compiler.".to_string(),
            technologies: vec![],
            link: None,
            github: None,
            start_date: None,
            end_date: None,
        }];
        let ops = compose(&doc).unwrap();
        let t = texts(&ops);
        assert!(!t.iter().any(|s| s.starts_with("Technologies")));

        doc.projects[0].technologies = vec!["UNIVAC".to_string(), "Assembly".to_string()];
        assert!(texts(&compose(&doc).unwrap()).contains(&"Technologies: UNIVAC, Assembly"));
    }

    #[test]
    fn test_certifications_and_languages_sections() {
        let mut doc = base_doc();
        doc.certifications = vec![Certification {
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: "2021-03".to_string(),
            link: None,
        }];
        doc.languages = vec![
            Language {
                name: "English".to_string(),
                proficiency: Proficiency::Native,
            },
            Language {
                name: "German".to_string(),
                proficiency: Proficiency::Basic,
            },
        ];
        let ops = compose(&doc).unwrap();
        let titles = section_titles(&ops);
        assert_eq!(titles, vec![CERTIFICATIONS_TITLE, LANGUAGES_TITLE]);
        let t = texts(&ops);
        assert!(t.contains(&"CNCF - 2021-03"));
        assert!(t.contains(&"English (Native), German (Basic)"));
    }

    #[test]
    fn test_section_order_is_fixed() {
        let mut doc = base_doc();
        doc.personal_info.summary = Some("Summary".to_string());
        doc.languages = vec![Language {
            name: "English".to_string(),
            proficiency: Proficiency::Native,
        }];
        doc.skills = vec![Skill {
            name: "COBOL".to_string(),
            level: SkillLevel::Expert,
            category: "Technical".to_string(),
        }];
        doc.experience = vec![experience_entry(true, None)];
        let ops = compose(&doc).unwrap();
        let titles = section_titles(&ops);
        assert_eq!(
            titles,
            vec![SUMMARY_TITLE, EXPERIENCE_TITLE, SKILLS_TITLE, LANGUAGES_TITLE]
        );
    }

    #[test]
    fn test_template_does_not_change_output() {
        let mut doc = base_doc();
        doc.personal_info.summary = Some("Summary".to_string());
        let modern = compose(&doc).unwrap();
        doc.template = crate::models::resume::Template::Creative;
        assert_eq!(compose(&doc).unwrap(), modern);
    }
}
