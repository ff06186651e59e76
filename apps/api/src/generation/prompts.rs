// All LLM prompt templates for the Generation module.

/// Cover-letter opening prompt.
/// Replace: {resume_json}, {title}, {company}, {description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are a career coach. Based on the candidate's resume and this job description, write a compelling, concise, and professional two-sentence opening for a cover letter. This snippet will be used for an 'auto-apply' feature, so it must be impactful and highlight the most relevant skills and experience.

Candidate's Resume:
{resume_json}

Job Posting:
Title: {title}
Company: {company}
Description: {description}"#;

/// Follow-up email prompt.
/// Replace: {title}, {company}
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = r#"You are a professional communication assistant. Write a polite, concise, and professional follow-up email regarding a job application. The email should be sent about a week after applying.

Job Details:
- Position: {title}
- Company: {company}

Generate only the body of the email. Start with a professional greeting (e.g., "Dear [Hiring Manager name] or Hiring Team,") and end with a professional closing (e.g., "Sincerely,
[Your Name]")."#;
