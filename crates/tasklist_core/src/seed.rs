//! Initial collection seeds.
//!
//! # Responsibility
//! - Describe records supplied at store construction.
//! - Parse markdown task lists (`- [ ] text`, `- [x] text`) into seeds.
//!
//! # Invariants
//! - Parsing never fails; lines that are not task items are skipped.
//! - Seed text is validated by the store, not by the parser.

use crate::model::record::Priority;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CHECKLIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[-*]\s+\[([ xX])\]\s+(.*?)\s*$").expect("valid checklist regex")
});
static PRIORITY_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+!(low|medium|high)$").expect("valid priority marker regex")
});

/// One record supplied at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl SeedRecord {
    /// Active seed without priority.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            priority: None,
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Parses GitHub-style task list lines into seeds, in document order.
///
/// A trailing `!low`, `!medium` or `!high` marker sets the priority and is
/// stripped from the text.
pub fn parse_checklist(markdown: &str) -> Vec<SeedRecord> {
    markdown.lines().filter_map(parse_checklist_line).collect()
}

fn parse_checklist_line(line: &str) -> Option<SeedRecord> {
    let caps = CHECKLIST_ITEM_RE.captures(line)?;
    let completed = caps.get(1).is_some_and(|m| m.as_str() != " ");
    let body = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let (text, priority) = match PRIORITY_MARKER_RE.captures(body) {
        Some(marker) => {
            let whole = marker.get(0)?;
            let priority = marker.get(1).and_then(|m| m.as_str().parse().ok());
            (&body[..whole.start()], priority)
        }
        None => (body, None),
    };

    Some(SeedRecord {
        text: text.trim().to_string(),
        completed,
        priority,
    })
}
