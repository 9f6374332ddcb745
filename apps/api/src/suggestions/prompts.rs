// Prompt constants and builders for the AI suggestion endpoints.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::Value;

use crate::llm_client::prompts::{or_not_specified, pretty_json};

/// System prompt for resume review and section feedback.
pub const REVIEW_SYSTEM: &str =
    "You are an expert resume writer and career coach with 15+ years of experience. \
    Provide practical, actionable advice that will help job seekers improve their resumes \
    and increase their chances of getting interviews. \
    Be specific, constructive, and encouraging.";

/// System prompt for drafting content for a single resume field.
pub const CONTENT_SYSTEM: &str =
    "You are an expert resume writer. \
    Provide specific, actionable content suggestions that will help job seekers create \
    compelling resume sections. \
    Be concise, professional, and industry-appropriate.";

/// System prompt for tailoring a resume to a job description.
pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are an expert career coach and resume writer. \
    Provide specific, actionable advice for tailoring resumes to specific job descriptions. \
    Focus on practical steps that will increase interview chances.";

pub const REVIEW_MAX_TOKENS: u32 = 1000;
pub const CONTENT_MAX_TOKENS: u32 = 500;
pub const JOB_ANALYSIS_MAX_TOKENS: u32 = 800;
pub const TEMPERATURE: f32 = 0.7;

pub fn question_prompt(question: &str, resume: &Value) -> String {
    format!(
        "As a professional resume writer and career coach, please help with this specific \
question about a resume: \"{question}\"

Resume Information:
{resume}

Please provide a detailed, actionable response that would help improve this resume.",
        resume = pretty_json(resume),
    )
}

/// Feedback on one section. A section the document lacks is sent as `null`.
pub fn section_prompt(section: &str, resume: &Value) -> String {
    let section_data = resume.get(section).cloned().unwrap_or(Value::Null);
    format!(
        "As a professional resume writer, please analyze this {section} section and provide \
specific suggestions for improvement:

{section} Section:
{data}

Please provide:
1. 3-5 specific improvement suggestions
2. Examples of better wording or phrasing
3. Industry best practices for this section
4. Any red flags or areas of concern",
        data = pretty_json(&section_data),
    )
}

pub fn review_prompt(resume: &Value) -> String {
    format!(
        "As a professional resume writer and career coach, please provide a comprehensive \
review of this resume:

Resume Data:
{resume}

Please provide:
1. Overall strengths and weaknesses
2. Specific improvement suggestions for each section
3. Industry best practices recommendations
4. ATS (Applicant Tracking System) optimization tips
5. Professional formatting suggestions",
        resume = pretty_json(resume),
    )
}

/// Field-specific drafting prompt. `summary`, `experience` and `skills` have
/// dedicated instructions; any other field gets the generic one.
pub fn content_prompt(
    field: &str,
    context: &str,
    job_title: Option<&str>,
    industry: Option<&str>,
) -> String {
    let facts = format!(
        "Context: {context}\nJob Title: {}\nIndustry: {}",
        or_not_specified(job_title),
        or_not_specified(industry),
    );

    match field {
        "summary" => format!(
            "Write a compelling professional summary for a resume.

{facts}

Requirements:
- 2-3 sentences maximum
- Professional and confident tone
- Highlight key achievements and skills
- Tailored to the target role
- ATS-friendly language"
        ),
        "experience" => format!(
            "Write 2-3 compelling bullet points for a work experience entry on a resume.

{facts}

Requirements:
- Start with strong action verbs
- Include quantifiable achievements when possible
- Focus on impact and results
- Use industry-specific keywords
- Keep each bullet point concise (1-2 lines)"
        ),
        "skills" => format!(
            "Suggest relevant skills for a resume based on the context.

{facts}

Please provide:
1. 5-8 technical skills
2. 3-5 soft skills
3. Industry-specific keywords
4. ATS-friendly skill descriptions"
        ),
        other => format!(
            "Provide content suggestions for the \"{other}\" section of a resume.

{facts}

Please provide professional, compelling content that would be appropriate for this resume section."
        ),
    }
}

pub fn job_analysis_prompt(job_description: &str, resume: Option<&Value>) -> String {
    let resume = resume
        .map(pretty_json)
        .unwrap_or_else(|| "Not provided".to_string());
    format!(
        "As a career coach and resume expert, please analyze this job description and provide \
specific recommendations for tailoring a resume to this position.

Job Description:
{job_description}

Resume Data (if provided):
{resume}

Please provide:
1. Key skills and qualifications to highlight
2. Keywords to include for ATS optimization
3. Specific achievements or experiences to emphasize
4. Areas where the resume could be improved to match this role
5. Suggested modifications for better alignment
6. Industry-specific insights"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_prompt_embeds_only_that_section() {
        let resume = json!({"skills": [{"name": "Rust"}], "projects": [{"name": "Secret"}]});
        let prompt = section_prompt("skills", &resume);
        assert!(prompt.contains("analyze this skills section"));
        assert!(prompt.contains("Rust"));
        assert!(!prompt.contains("Secret"));
    }

    #[test]
    fn test_section_prompt_missing_section_is_null() {
        let prompt = section_prompt("awards", &json!({}));
        assert!(prompt.contains("awards Section:\nnull"));
    }

    #[test]
    fn test_content_prompt_defaults_missing_inputs() {
        let prompt = content_prompt("summary", "Backend engineer", None, Some(" "));
        assert!(prompt.contains("Job Title: Not specified"));
        assert!(prompt.contains("Industry: Not specified"));
        assert!(prompt.contains("professional summary"));
    }

    #[test]
    fn test_content_prompt_generic_field() {
        let prompt = content_prompt("awards", "Won things", Some("SRE"), None);
        assert!(prompt.contains("the \"awards\" section"));
        assert!(prompt.contains("Job Title: SRE"));
    }

    #[test]
    fn test_job_analysis_prompt_without_resume() {
        let prompt = job_analysis_prompt("Rust engineer wanted", None);
        assert!(prompt.contains("Rust engineer wanted"));
        assert!(prompt.contains("Resume Data (if provided):\nNot provided"));
    }
}
