//! Soft-constraint evaluation of candidate slots against insights.
//!
//! Matching is plain substring containment:
//! - a slot is vetoed when an impact text says "avoid", names the slot's
//!   `HH:MM`, and the impact or summary mentions one of the task's tags
//! - a block is annotated with summaries mentioning a task tag and impacts
//!   naming the block's `HH` hour

use chrono::NaiveDateTime;

use super::Insight;

/// Read-only view over the insights of one scheduling run.
#[derive(Debug, Clone, Copy)]
pub struct InsightFilter<'a> {
    insights: &'a [Insight],
}

impl<'a> InsightFilter<'a> {
    pub fn new(insights: &'a [Insight]) -> Self {
        Self { insights }
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    /// Whether a slot starting at `slot_start` is acceptable for a task with `tags`.
    pub fn accepts(&self, slot_start: NaiveDateTime, tags: &[String]) -> bool {
        let clock = slot_start.format("%H:%M").to_string();

        !self.insights.iter().any(|insight| {
            let impact = insight.impact_text();
            !impact.is_empty()
                && impact.to_lowercase().contains("avoid")
                && impact.contains(&clock)
                && (mentions_tag(impact, tags) || mentions_tag(insight.summary_text(), tags))
        })
    }

    /// Note for a block starting at `slot_start`, or `None` if nothing applies.
    pub fn annotate(&self, slot_start: NaiveDateTime, tags: &[String]) -> Option<String> {
        let hour = slot_start.format("%H").to_string();
        let mut notes: Vec<&str> = Vec::new();

        for insight in self.insights {
            let summary = insight.summary_text();
            if !summary.is_empty() && mentions_tag(summary, tags) {
                notes.push(summary);
            }
            let impact = insight.impact_text();
            if !impact.is_empty() && impact.contains(&hour) {
                notes.push(impact);
            }
        }

        if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        }
    }
}

/// Case-insensitive check for any non-blank tag inside `text`.
fn mentions_tag(text: &str, tags: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .any(|tag| haystack.contains(&tag.to_lowercase()))
}
