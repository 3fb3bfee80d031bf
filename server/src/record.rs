use serde::{Deserialize, Serialize};

use crate::normalization;

/// The recording media offered by the entry form. Free-text values are
/// still accepted; this list only drives the form's dropdown.
pub const RECORDING_MEDIA: [&str; 6] = [
    "",
    "Audio",
    "Video",
    "Notas Presenciales",
    "Videoconferencia",
    "Otro",
];

/// A single interview record, collected from one form submission.
///
/// Every field defaults to the empty string so a partially filled form
/// still renders a complete document.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InterviewRecord {
    /// The interviewee's name. The only field a submission requires.
    #[serde(deserialize_with = "normalization::deserialize")]
    pub name: String,

    /// The contact email provided.
    pub email: String,

    /// The occupation provided.
    pub occupation: String,

    /// The age provided. Collected as free text.
    pub age: String,

    /// How the interview was recorded.
    pub recording_medium: String,

    /// The start and end times, as free text.
    pub start_end_time: String,

    /// A link to the recording, if any.
    pub recording_link: String,

    /// Where the interview took place.
    pub location: String,

    /// General field notes.
    #[serde(deserialize_with = "normalization::deserialize_multiline")]
    pub field_notes: String,

    /// The key questions asked, one per line.
    #[serde(deserialize_with = "normalization::deserialize_multiline")]
    pub key_questions: String,

    /// Quotes worth keeping, one per line.
    #[serde(deserialize_with = "normalization::deserialize_multiline")]
    pub relevant_quotes: String,

    /// The problems identified during the interview.
    #[serde(deserialize_with = "normalization::deserialize_multiline")]
    pub identified_problems: String,

    /// The single most relevant problem, described.
    #[serde(deserialize_with = "normalization::deserialize_multiline")]
    pub most_relevant_problem: String,
}

impl InterviewRecord {
    /// Whether the record satisfies the only submission precondition.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}
