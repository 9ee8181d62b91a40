//! SSE event types and definitions
//!
//! Contains the typed events emitted by the search pipeline backend, plus the
//! fallbacks used when a payload is not a known event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle marker carried by most pipeline events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Started,
    Completed,
    Error,
    /// Any status string this client does not know about
    #[serde(other)]
    Other,
}

/// Typed events from the search pipeline.
///
/// Fields are optional wherever the backend omits them for some phases, so a
/// `started` event and its `completed` counterpart share one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Prompt analysis; `completed` carries the generated search queries
    Analysis {
        status: Option<Phase>,
        #[serde(default)]
        search_queries: Option<Vec<String>>,
    },
    /// A web search for one query
    Search {
        status: Option<Phase>,
        query: Option<String>,
        results_count: Option<u64>,
    },
    /// Number of candidate URLs collected from all searches
    UrlsFound { count: Option<u64> },
    /// Scraping of a single page
    Scraping {
        status: Option<Phase>,
        url: Option<String>,
        title: Option<String>,
    },
    /// Scraping of a single page failed
    ScrapingError {
        url: Option<String>,
        error: Option<String>,
    },
    /// Relevant-sentence extraction
    Extracting {
        status: Option<Phase>,
        url: Option<String>,
    },
    /// A processed source contributing to the answer
    SearchResult {
        url: String,
        title: Option<String>,
        sentences_count: Option<u64>,
    },
    /// Duplicate sentence removal across sources
    Deduplication {
        original_count: Option<u64>,
        final_count: Option<u64>,
    },
    /// LLM answer generation
    ResponseGeneration { status: Option<Phase> },
    /// The authoritative answer for this turn
    FinalResponse {
        #[serde(default)]
        message: String,
    },
    /// Pipeline finished
    Done,
    /// Pipeline failed
    Error {
        message: Option<String>,
        error: Option<String>,
    },
}

impl PipelineEvent {
    /// Returns the wire `type` name of the event.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            PipelineEvent::Analysis { .. } => "analysis",
            PipelineEvent::Search { .. } => "search",
            PipelineEvent::UrlsFound { .. } => "urls_found",
            PipelineEvent::Scraping { .. } => "scraping",
            PipelineEvent::ScrapingError { .. } => "scraping_error",
            PipelineEvent::Extracting { .. } => "extracting",
            PipelineEvent::SearchResult { .. } => "search_result",
            PipelineEvent::Deduplication { .. } => "deduplication",
            PipelineEvent::ResponseGeneration { .. } => "response_generation",
            PipelineEvent::FinalResponse { .. } => "final_response",
            PipelineEvent::Done => "done",
            PipelineEvent::Error { .. } => "error",
        }
    }
}

/// One decoded frame payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A known pipeline event
    Pipeline(PipelineEvent),
    /// Valid JSON that is not a known pipeline event (unknown or mis-shaped
    /// `type`). Kept so newer backends do not break older clients.
    Unknown { kind: String, payload: Value },
    /// Payload that was not JSON at all
    Text(String),
}

impl StreamEvent {
    /// Decode a frame payload.
    ///
    /// Never fails: non-JSON payloads become [`StreamEvent::Text`] and JSON
    /// that does not match a known event becomes [`StreamEvent::Unknown`].
    pub fn parse(payload: &str) -> Self {
        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(_) => return StreamEvent::Text(payload.to_string()),
        };

        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match PipelineEvent::deserialize(&value) {
            Ok(event) => StreamEvent::Pipeline(event),
            Err(_) => StreamEvent::Unknown {
                kind,
                payload: value,
            },
        }
    }

    /// Returns the `type` name for logging.
    pub fn kind(&self) -> &str {
        match self {
            StreamEvent::Pipeline(event) => event.event_type_name(),
            StreamEvent::Unknown { kind, .. } => kind,
            StreamEvent::Text(_) => "text",
        }
    }

    /// Returns the pipeline event, if this is one.
    pub fn as_pipeline(&self) -> Option<&PipelineEvent> {
        match self {
            StreamEvent::Pipeline(event) => Some(event),
            _ => None,
        }
    }
}
