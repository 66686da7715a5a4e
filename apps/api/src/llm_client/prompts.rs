// Prompt templates for resume analysis.

/// Fixed evaluation instruction. `{resume_text}` is replaced with the transcript verbatim.
pub const ANALYSIS_PROMPT: &str = "Analyze this resume and provide:
1. Overall assessment
2. Key strengths
3. Areas for improvement
4. Suggested skills to add
5. Overall rating (1-10)

Resume:
{resume_text}";

pub fn build_analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT.replace("{resume_text}", resume_text)
}
