//! Search-pipeline progress projection.
//!
//! [`ProgressProjector`] folds the ordered events of one chat turn into a
//! [`ProgressState`] that the UI renders. The state is derived, never
//! authoritative, and lives exactly as long as the turn.
//!
//! Once the projector reaches a terminal state (`done`, `error`,
//! `final_response`, or stream completion) every further event is ignored,
//! so a recorded final answer can never be overwritten.

use serde::Serialize;

use crate::error::StreamError;
use crate::sse::{Phase, PipelineEvent, StreamEvent};

/// Status of one scraped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Started,
    Completed,
    Error,
}

/// Progress of scraping a single URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeEntry {
    pub url: String,
    pub status: ScrapeStatus,
    pub title: Option<String>,
}

/// A source that contributed to the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultEntry {
    pub url: String,
    pub title: String,
    pub sentences_count: u64,
}

/// UI-facing progress of one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    /// Human-readable description of the latest step
    pub current_status: String,
    /// Queries generated by prompt analysis
    pub search_queries: Vec<String>,
    /// Processed sources, unique by URL, in arrival order
    pub search_results: Vec<SearchResultEntry>,
    /// Scraped pages, unique by URL, in first-seen order
    pub scraping_status: Vec<ScrapeEntry>,
    /// The final answer, once received
    pub final_content: Option<String>,
    /// No further transitions happen once set
    pub is_complete: bool,
}

impl ProgressState {
    /// Status line to display; idle turns show a placeholder.
    pub fn display_status(&self) -> &str {
        if self.current_status.is_empty() {
            "Initializing..."
        } else {
            &self.current_status
        }
    }

    /// Scrape entry for a URL, if seen.
    pub fn scrape_entry(&self, url: &str) -> Option<&ScrapeEntry> {
        self.scraping_status.iter().find(|entry| entry.url == url)
    }
}

/// Reducer owning the progress state of one turn.
#[derive(Debug, Default)]
pub struct ProgressProjector {
    state: ProgressState,
}

impl ProgressProjector {
    /// Create a projector in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current projected state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Consume the projector, returning its state.
    pub fn into_state(self) -> ProgressState {
        self.state
    }

    /// Check if a terminal state has been reached.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// Apply one event. Returns `true` if the state changed.
    pub fn apply(&mut self, event: &StreamEvent) -> bool {
        if self.state.is_complete {
            tracing::debug!("Ignoring '{}' event after completion", event.kind());
            return false;
        }

        match event {
            StreamEvent::Pipeline(event) => {
                let before = self.state.clone();
                self.apply_pipeline(event);
                before != self.state
            }
            StreamEvent::Unknown { kind, .. } => {
                tracing::debug!("Ignoring unknown event type '{}'", kind);
                false
            }
            StreamEvent::Text(_) => false,
        }
    }

    /// Mark the turn complete because the stream ended.
    ///
    /// Returns `true` if this call performed the transition.
    pub fn complete(&mut self) -> bool {
        if self.state.is_complete {
            return false;
        }
        if self.state.current_status.is_empty() {
            self.state.current_status = "Completed".to_string();
        }
        self.state.is_complete = true;
        true
    }

    /// Mark the turn failed because the transport failed.
    ///
    /// Returns `true` if this call performed the transition.
    pub fn fail(&mut self, error: &StreamError) -> bool {
        if self.state.is_complete {
            return false;
        }
        self.state.current_status = format!("Error: {}", error);
        self.state.is_complete = true;
        true
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.state.current_status = status.into();
    }

    fn apply_pipeline(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Analysis {
                status,
                search_queries,
            } => match status {
                Some(Phase::Started) => self.set_status("Analyzing prompt..."),
                Some(Phase::Completed) => {
                    self.set_status("Analysis complete");
                    if let Some(queries) = search_queries {
                        self.state.search_queries = queries.clone();
                    }
                }
                _ => {}
            },
            PipelineEvent::Search {
                status,
                query,
                results_count,
            } => match status {
                Some(Phase::Started) => {
                    self.set_status(format!("Searching: \"{}\"", query.as_deref().unwrap_or("")))
                }
                Some(Phase::Completed) => {
                    self.set_status(format!("Found {} results", results_count.unwrap_or(0)))
                }
                _ => {}
            },
            PipelineEvent::UrlsFound { count } => {
                self.set_status(format!("Found {} URLs", count.unwrap_or(0)));
            }
            PipelineEvent::Scraping { status, url, title } => {
                let Some(url) = url else {
                    return;
                };
                match status {
                    Some(Phase::Completed) => {
                        let label = title.as_deref().unwrap_or(url);
                        self.set_status(format!("Scraped: {}", label));
                        self.upsert_scrape(url, ScrapeStatus::Completed, title.clone());
                    }
                    Some(Phase::Error) => {
                        self.set_status(format!("Scraping failed: {}", url));
                        self.upsert_scrape(url, ScrapeStatus::Error, title.clone());
                    }
                    _ => {
                        self.set_status(format!("Scraping: {}", url));
                        self.insert_scrape(url);
                    }
                }
            }
            PipelineEvent::ScrapingError { url, .. } => {
                let Some(url) = url else {
                    return;
                };
                self.set_status(format!("Scraping failed: {}", url));
                self.upsert_scrape(url, ScrapeStatus::Error, None);
            }
            PipelineEvent::Extracting { status, .. } => match status {
                Some(Phase::Started) => self.set_status("Extracting content..."),
                Some(Phase::Completed) => self.set_status("Extraction complete"),
                _ => {}
            },
            PipelineEvent::SearchResult {
                url,
                title,
                sentences_count,
            } => {
                let title = title.clone().unwrap_or_else(|| url.clone());
                self.set_status(format!("Processed: {}", title));
                if !self.state.search_results.iter().any(|r| &r.url == url) {
                    self.state.search_results.push(SearchResultEntry {
                        url: url.clone(),
                        title,
                        sentences_count: sentences_count.unwrap_or(0),
                    });
                }
            }
            PipelineEvent::Deduplication {
                original_count,
                final_count,
            } => {
                let removed = original_count
                    .unwrap_or(0)
                    .saturating_sub(final_count.unwrap_or(0));
                self.set_status(format!("Removed {} duplicates", removed));
            }
            PipelineEvent::ResponseGeneration { status } => match status {
                Some(Phase::Started) => self.set_status("Generating response..."),
                Some(Phase::Completed) => self.set_status("Response generated"),
                _ => {}
            },
            PipelineEvent::FinalResponse { message } => {
                self.set_status(message.clone());
                self.state.final_content = Some(message.clone());
                self.state.is_complete = true;
            }
            PipelineEvent::Done => {
                self.set_status("Completed");
                self.state.is_complete = true;
            }
            PipelineEvent::Error { message, error } => {
                let detail = message
                    .as_deref()
                    .or(error.as_deref())
                    .unwrap_or("Unknown error");
                self.set_status(format!("Error: {}", detail));
                self.state.is_complete = true;
            }
        }
    }

    /// Insert a URL as `started` unless it is already tracked.
    fn insert_scrape(&mut self, url: &str) {
        if self.state.scrape_entry(url).is_none() {
            self.state.scraping_status.push(ScrapeEntry {
                url: url.to_string(),
                status: ScrapeStatus::Started,
                title: None,
            });
        }
    }

    /// Update a URL's entry in place, inserting it if unseen.
    fn upsert_scrape(&mut self, url: &str, status: ScrapeStatus, title: Option<String>) {
        match self.state.scraping_status.iter_mut().find(|e| e.url == url) {
            Some(entry) => {
                entry.status = status;
                if title.is_some() {
                    entry.title = title;
                }
            }
            None => self.state.scraping_status.push(ScrapeEntry {
                url: url.to_string(),
                status,
                title,
            }),
        }
    }
}
