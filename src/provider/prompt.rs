use super::types::AnalysisRequest;

/// Builds the single user message sent on the hybrid path.
///
/// The model is told not to reuse ideal-profile wording; otherwise its summary
/// tends to echo the reference profiles back.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let ideals = request
        .ideal_texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("Profile {}: {}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert recruiter. Analyze the following candidate profile for fit to the job description and ideal profiles.\n\n\
         Job Description:\n{job}\n\n\
         Ideal Profiles:\n{ideals}\n\n\
         Candidate Profile:\n{summary}\n\n\
         Return:\n\
         - Short summary of experience and fit\n\
         - Main strengths\n\
         - Main concerns (gaps)\n\
         - Explanation for the score (0-100)\n\n\
         IMPORTANT: Do NOT copy text from the ideal profiles. Write a unique summary for the candidate only, \
         based on the Candidate Profile above. Do not use names or details from the ideal profiles in the candidate summary.",
        job = request.job_description,
        ideals = ideals,
        summary = request.summary,
    )
}
