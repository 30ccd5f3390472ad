use base64::Engine;

/// Audio container formats accepted from the browser recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Webm,
}

impl AudioFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "audio/wav" => Some(Self::Wav),
            "audio/webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Webm => "audio/webm",
        }
    }

    /// File extension the transcription API uses to detect the container
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Webm => "webm",
        }
    }
}

/// Decoded audio from a data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub format: AudioFormat,
    pub bytes: Vec<u8>,
}

/// What the candidate sent as their answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateInput {
    Text(String),
    Audio(AudioClip),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioInputError {
    /// `type_tag` is the data URI prefix up to the first `;`, e.g. `data:audio/ogg`
    #[error("unsupported audio type: {type_tag}")]
    UnsupportedType { type_tag: String },

    #[error("invalid audio payload for {type_tag}: {reason}")]
    InvalidPayload { type_tag: String, reason: String },
}

impl AudioInputError {
    pub fn type_tag(&self) -> &str {
        match self {
            Self::UnsupportedType { type_tag } | Self::InvalidPayload { type_tag, .. } => type_tag,
        }
    }
}

/// Classify a candidate response as plain text or a base64 audio data URI
/// of the form `data:audio/<wav|webm>[;codecs=opus];base64,<payload>`.
pub fn parse_candidate_response(raw: &str) -> Result<CandidateInput, AudioInputError> {
    if !raw.starts_with("data:") {
        return Ok(CandidateInput::Text(raw.to_string()));
    }

    let (header, payload) = raw.split_once(',').unwrap_or((raw, ""));
    let mut params = header.split(';');
    let type_tag = params.next().unwrap_or(header).to_string();

    let mime = type_tag.trim_start_matches("data:");
    let Some(format) = AudioFormat::from_mime(mime) else {
        return Err(AudioInputError::UnsupportedType { type_tag });
    };

    if !params.any(|param| param == "base64") {
        return Err(AudioInputError::InvalidPayload {
            type_tag,
            reason: "expected base64 encoding".to_string(),
        });
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AudioInputError::InvalidPayload {
            type_tag: type_tag.clone(),
            reason: e.to_string(),
        })?;

    Ok(CandidateInput::Audio(AudioClip { format, bytes }))
}
