use super::session::{Candidate, JobContext};

/// Reply sent when an interview ends before any question was answered
pub const NO_ANSWERS_RESPONSE: &str =
    "Interview ended. No questions answered to provide any feedback.";

const END_INTERVIEW_REQUEST: &str = "Please end the interview now. Please provide me personalized feedback on what I did well and how I can improve.";

/// Persona and briefing for the interviewer model
pub fn system_prompt(candidate: &Candidate, job: &JobContext) -> String {
    let name = &candidate.given_name;
    format!(
        "You are Cognea, an AI assistant that helps people practice for interviews; \
         Today you are interviewing {name} to be a {title} at {company}; \
         The responsibilities for this job include {description} and {name} has the following background: {background}; \
         You will help them prep for their interview by pretending to be the hiring manager interviewing them; \
         Make sure to ask follow up questions on each question; \
         Be concise in your questions and follow ups; \
         At any point the user or you end the interview, always instruct the user to click the \"End Interview\" button.",
        title = job.job_title,
        company = job.company,
        description = job.job_description,
        background = job.candidate_background,
    )
}

/// Opening message written on the candidate's behalf
pub fn kickoff_prompt(candidate: &Candidate, job: &JobContext) -> String {
    format!(
        "Hi Cognea, I am {name}. Please interview me for the {title} role at {company}. \
         The job description includes the following information: {description}; \
         My background includes: {background}. \
         Please pretend this an actual interview and interview me, one question at a time. \
         If at any time you or I end the interview, always instruct me to click the \"End Interview\" button;",
        name = candidate.given_name,
        title = job.job_title,
        company = job.company,
        description = job.job_description,
        background = job.candidate_background,
    )
}

/// Closing user turn asking for feedback, prefixed by the candidate's last
/// answer when one came with the request.
pub fn end_interview_prompt(candidate_response: Option<&str>) -> String {
    let prefix = candidate_response
        .map(|response| format!("{response};"))
        .unwrap_or_default();
    format!("{prefix}\n{END_INTERVIEW_REQUEST}")
}
