use insight_core::AnalyzeRequest;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub struct AnalysisPrompts;

impl AnalysisPrompts {
    pub fn system() -> &'static str {
        r#"You are a product analyst. Be concise and concrete.

Reply with a single JSON object and nothing else, using exactly these keys:
{
  "summary": "one or two sentences summarizing the feedback",
  "themes": ["short theme name", "..."],
  "opportunities": ["opportunity statement", "..."],
  "experiments": ["suggested experiment", "..."],
  "prd_outline": ["PRD section heading", "..."]
}

Rules:
- "summary" must be a non-empty string.
- "themes", "opportunities" and "experiments" must each contain at least one non-empty string.
- "prd_outline" is a list of non-empty strings and may be empty."#
    }

    pub fn user(request: &AnalyzeRequest) -> String {
        let context = request
            .context()
            .map(|c| format!("\nContext: {}", c))
            .unwrap_or_default();

        let feedback_lines = request
            .feedback
            .iter()
            .map(|item| format!("- {}", item.trim()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Analyze these feedback notes and return the JSON object described above.{context}\nFeedback:\n{feedback_lines}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_lists_feedback() {
        let request = AnalyzeRequest::new(vec!["Slow export".to_string(), " No SSO ".to_string()]);
        let prompt = AnalysisPrompts::user(&request);

        assert!(!prompt.contains("Context:"));
        assert!(prompt.ends_with("Feedback:\n- Slow export\n- No SSO"));
    }

    #[test]
    fn test_user_prompt_includes_context() {
        let request =
            AnalyzeRequest::new(vec!["Slow export".to_string()]).with_context("B2B SaaS tool");
        let prompt = AnalysisPrompts::user(&request);

        assert!(prompt.contains("\nContext: B2B SaaS tool\nFeedback:\n"));
    }

    #[test]
    fn test_system_prompt_names_every_field() {
        let system = AnalysisPrompts::system();
        for field in ["summary", "themes", "opportunities", "experiments", "prd_outline"] {
            assert!(system.contains(field), "missing {}", field);
        }
    }
}
