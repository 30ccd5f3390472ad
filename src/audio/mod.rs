pub mod corrections;
pub mod data_uri;
pub mod file;

pub use corrections::correct_transcription;
pub use data_uri::{
    parse_candidate_response, AudioClip, AudioFormat, AudioInputError, CandidateInput,
};
pub use file::AudioFile;
