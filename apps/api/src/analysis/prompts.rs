// LLM prompt constants for the remote match scorer.

/// System prompt for ATS scoring. Enforces JSON-only output.
pub const ATS_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) analyzer. \
    Provide accurate, detailed analysis in the requested JSON format. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// ATS scoring prompt template. Replace `{resume_text}` and `{job_text}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume against the job description and provide a detailed comparison.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "ats_score": <integer between 0 and 100>,
  "matched_skills": ["skills present in both the resume and the job description"],
  "missing_skills": ["skills the job description asks for that the resume lacks"],
  "summary": "2-3 sentence analysis of candidate fit",
  "experience_match": "brief analysis of experience match",
  "education_match": "brief analysis of education match",
  "recommendations": ["specific changes that would improve the match"]
}

RULES:
1. A skill must never appear in both matched_skills and missing_skills
2. ats_score must reflect the share of job requirements the resume covers
3. Return ONLY the JSON object and nothing else"#;

/// Renders the scoring prompt for one resume / job pair.
/// Single pass, so placeholder-looking text inside either document is left alone.
pub fn render_ats_prompt(resume_text: &str, job_text: &str) -> String {
    let (head, rest) = ATS_PROMPT_TEMPLATE
        .split_once("{resume_text}")
        .unwrap_or((ATS_PROMPT_TEMPLATE, ""));
    let (middle, tail) = rest.split_once("{job_text}").unwrap_or((rest, ""));

    let mut prompt = String::with_capacity(
        ATS_PROMPT_TEMPLATE.len() + resume_text.len() + job_text.len(),
    );
    prompt.push_str(head);
    prompt.push_str(resume_text);
    prompt.push_str(middle);
    prompt.push_str(job_text);
    prompt.push_str(tail);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_documents_verbatim() {
        let prompt = render_ats_prompt("RESUME BODY", "JOB BODY");
        assert!(prompt.contains("RESUME:\nRESUME BODY"));
        assert!(prompt.contains("JOB DESCRIPTION:\nJOB BODY"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_text}"));
    }

    #[test]
    fn test_placeholders_inside_documents_are_not_expanded() {
        let prompt = render_ats_prompt("see {job_text}", "see {resume_text}");
        assert!(prompt.contains("RESUME:\nsee {job_text}"));
        assert!(prompt.contains("JOB DESCRIPTION:\nsee {resume_text}"));
    }

    #[test]
    fn test_prompt_names_every_result_field() {
        for field in [
            "ats_score",
            "matched_skills",
            "missing_skills",
            "summary",
            "experience_match",
            "education_match",
            "recommendations",
        ] {
            assert!(ATS_PROMPT_TEMPLATE.contains(field), "missing {field}");
        }
    }
}
