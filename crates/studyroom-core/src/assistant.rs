//! Seams for the assistant's external collaborators.
//!
//! The core consumes three outside services: a generative-text completion
//! service, a document-text extractor, and a speech-to-text stream. Only the
//! interfaces live here; implementations are wired in by the frontend. The
//! pure input/output text transforms the assistant applies around those
//! services live here too.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A generative-text completion service.
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for the prompt.
    fn complete(&self, prompt: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Declared type of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
}

/// Extracts plain text from uploaded file bytes.
pub trait DocumentExtractor: Send + Sync {
    fn extract_text(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Incremental output of a speech-to-text stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TranscriptEvent {
    /// In-progress hypothesis, may be revised.
    Partial { text: String, confidence: f32 },
    /// Committed transcript segment.
    Final { text: String, confidence: f32 },
}

impl TranscriptEvent {
    pub fn confidence(&self) -> f32 {
        match self {
            TranscriptEvent::Partial { confidence, .. } => *confidence,
            TranscriptEvent::Final { confidence, .. } => *confidence,
        }
    }

    pub fn level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence())
    }
}

/// Display bucket for a recognition confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// High above 0.8, medium above 0.6, low otherwise.
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > 0.8 {
            ConfidenceLevel::High
        } else if confidence > 0.6 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Prepare user text for the completion service: collapse whitespace, strip
/// HTML tags, and keep only word characters and basic punctuation.
pub fn sanitize_input(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    static TAGS: OnceLock<Regex> = OnceLock::new();
    static UNSAFE: OnceLock<Regex> = OnceLock::new();

    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    let tags = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"));
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r"[^\w\s.,!?-]").expect("valid regex"));

    let collapsed = whitespace.replace_all(text.trim(), " ");
    let untagged = tags.replace_all(&collapsed, "");
    unsafe_chars.replace_all(&untagged, "").trim().to_string()
}

/// Flatten lightweight markdown from a completion into plain text: bold,
/// italic, headings, and inline code.
pub fn strip_markdown(text: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    static HEADING: OnceLock<Regex> = OnceLock::new();
    static CODE: OnceLock<Regex> = OnceLock::new();

    let bold = BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
    let italic = ITALIC.get_or_init(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
    let heading = HEADING.get_or_init(|| Regex::new(r"(?m)^#+ (.*)$").expect("valid regex"));
    let code = CODE.get_or_init(|| Regex::new(r"`(.*?)`").expect("valid regex"));

    let text = bold.replace_all(text, "$1");
    let text = italic.replace_all(&text, "$1");
    let text = heading.replace_all(&text, "$1");
    code.replace_all(&text, "$1").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_and_strips() {
        assert_eq!(
            sanitize_input("  What   is\n<b>photosynthesis</b>?  "),
            "What is photosynthesis?"
        );
        assert_eq!(sanitize_input("2 + 2 = 4 :)"), "2  2  4");
    }

    #[test]
    fn strip_markdown_flattens_formatting() {
        let input = "# Plan\n**Step 1**: review *chapter* and run `quiz`";
        assert_eq!(
            strip_markdown(input),
            "Plan\nStep 1: review chapter and run quiz"
        );
    }

    #[test]
    fn confidence_buckets() {
        assert_eq!(ConfidenceLevel::from_confidence(0.95), ConfidenceLevel::High);
        assert_eq!(
            ConfidenceLevel::from_confidence(0.7),
            ConfidenceLevel::Medium
        );
        assert_eq!(ConfidenceLevel::from_confidence(0.6), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_confidence(0.1), ConfidenceLevel::Low);
    }

    #[test]
    fn transcript_event_reports_its_level() {
        let event = TranscriptEvent::Final {
            text: "explain osmosis".into(),
            confidence: 0.9,
        };
        assert_eq!(event.level(), ConfidenceLevel::High);
    }

    struct Uppercase;

    impl CompletionClient for Uppercase {
        fn complete(
            &self,
            prompt: &str,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok(prompt.to_uppercase())
        }
    }

    #[test]
    fn completion_client_is_object_safe() {
        let client: Box<dyn CompletionClient> = Box::new(Uppercase);
        assert_eq!(client.complete("hello").unwrap(), "HELLO");
    }
}
