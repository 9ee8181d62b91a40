//! Plain-text rendering for terminal output.
//!
//! Live progress goes to stderr so stdout carries only the answer and
//! listings.

use std::io::{self, Write};

use crate::models::{ConversationDto, DocumentDto};
use crate::progress::{ProgressState, ScrapeStatus};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}

/// Spinner characters, one per progress line.
const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Prints one line per status change of a running turn.
#[derive(Debug, Default)]
pub struct ProgressPrinter {
    last_status: String,
    ticks: usize,
}

impl ProgressPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line to print for `state`, or `None` if its status was already shown.
    pub fn next_line(&mut self, state: &ProgressState) -> Option<String> {
        let status = state.display_status();
        if status == self.last_status {
            return None;
        }
        self.last_status = status.to_string();

        let icon = if state.is_complete {
            if status.starts_with("Error:") {
                icons::FAILURE.to_string()
            } else {
                icons::SUCCESS.to_string()
            }
        } else {
            let c = SPINNER_CHARS[self.ticks % SPINNER_CHARS.len()];
            self.ticks += 1;
            c.to_string()
        };
        // The final answer is printed in full separately
        let text = if state.final_content.as_deref() == Some(status) {
            "Answer received"
        } else {
            status
        };
        Some(format!("  {} {}", icon, text))
    }

    /// Print the line for `state` to stderr, if there is a new one.
    pub fn update(&mut self, state: &ProgressState) {
        if let Some(line) = self.next_line(state) {
            let mut stderr = io::stderr();
            writeln!(stderr, "{}", line).ok();
            stderr.flush().ok();
        }
    }
}

/// Summary of what the pipeline did: queries, scraped pages, sources.
pub fn render_summary(state: &ProgressState) -> String {
    let mut out = String::new();

    if !state.search_queries.is_empty() {
        out.push_str("Queries:\n");
        for query in &state.search_queries {
            out.push_str(&format!("  - {}\n", query));
        }
    }

    if !state.scraping_status.is_empty() {
        let scraped = state
            .scraping_status
            .iter()
            .filter(|e| e.status == ScrapeStatus::Completed)
            .count();
        let failed = state
            .scraping_status
            .iter()
            .filter(|e| e.status == ScrapeStatus::Error)
            .count();
        out.push_str(&format!(
            "Pages: {} scraped, {} failed, {} total\n",
            scraped,
            failed,
            state.scraping_status.len()
        ));
    }

    if !state.search_results.is_empty() {
        out.push_str("Sources:\n");
        for (i, result) in state.search_results.iter().enumerate() {
            out.push_str(&format!(
                "  [{}] {} ({} sentences)\n      {}\n",
                i + 1,
                result.title,
                result.sentences_count,
                result.url
            ));
        }
    }

    out
}

/// Transcript of a conversation.
pub fn render_conversation(conversation: &ConversationDto) -> String {
    let mut out = String::new();
    let title = if conversation.title.is_empty() {
        "(untitled)"
    } else {
        &conversation.title
    };
    out.push_str(&format!("{}\n", title));
    out.push_str(&format!("{}\n", "═".repeat(LINE_WIDTH)));
    out.push_str(&format!("id: {}\n", conversation.id));
    if let Some(created) = conversation.created_at {
        out.push_str(&format!("created: {}\n", created.format("%Y-%m-%d %H:%M")));
    }

    for message in &conversation.messages {
        out.push('\n');
        match message.sent_at {
            Some(sent) => out.push_str(&format!(
                "{} [{}]\n",
                message.role.label(),
                sent.format("%H:%M")
            )),
            None => out.push_str(&format!("{}\n", message.role.label())),
        }
        out.push_str(&format!("{}\n", "─".repeat(LINE_WIDTH)));
        out.push_str(&message.content);
        out.push('\n');
    }

    if conversation.messages.is_empty() {
        out.push_str("\n(no messages)\n");
    }
    out
}

/// Table of uploaded documents.
pub fn render_documents(documents: &[DocumentDto]) -> String {
    if documents.is_empty() {
        return "No documents.\n".to_string();
    }
    let mut out = String::new();
    for doc in documents {
        let uploaded = doc
            .uploaded_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>6}  {:<32}  {:>9}  {}\n",
            doc.id,
            doc.name,
            doc.display_size(),
            uploaded
        ));
    }
    out
}
