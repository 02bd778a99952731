//! LLM prompt for paper analysis

/// Builds the analysis prompt for one paper
///
/// The template is fixed; the paper text is appended verbatim, including
/// when it is empty.
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(ANALYSIS_INSTRUCTIONS.len() + self.text.len() + 16);

        // 1. Instruction and expected format
        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. The paper
        prompt.push_str("Paper:\n");
        prompt.push_str(self.text);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = "You are an expert academic reviewer. Analyze the following research paper and provide:
1. A concise, clear summary (2-3 sentences).
2. A detailed description of the main methodology and datasets used (be specific).
3. A critical analysis of any potential biases or limitations (be objective and cite examples).
4. Suggestions for unexplored research areas or literature gaps (be actionable and relevant).
Format your answer as:
1. Summary: ...
2. Methodology: ...
3. Bias: ...
4. Gaps: ...";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_text_verbatim() {
        let text = "  Deep learning for protein folding.\n\nWe train on PDB.  ";
        let prompt = PromptBuilder::new(text).build();
        assert!(prompt.ends_with(&format!("Paper:\n{}", text)));
    }

    #[test]
    fn test_prompt_requests_four_numbered_answers() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.starts_with("You are an expert academic reviewer."));
        for label in ["1. Summary:", "2. Methodology:", "3. Bias:", "4. Gaps:"] {
            assert!(prompt.contains(label), "missing {}", label);
        }
    }

    #[test]
    fn test_empty_text_still_builds() {
        let prompt = PromptBuilder::new("").build();
        assert!(prompt.ends_with("Paper:\n"));
    }
}
