//! Advisory insights supplied by an upstream knowledge source.
//!
//! Insights never remove time from the day. They can only veto a candidate
//! slot for a matching task or annotate a committed block.

mod filter;

pub use filter::InsightFilter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence attached to an insight by its producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

/// Free-text advice about the day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Insight {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub suggested_schedule_impact: Option<String>,
    #[serde(default)]
    pub retrieved_at: Option<DateTime<Utc>>,
}

impl Insight {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.suggested_schedule_impact = Some(impact.into());
        self
    }

    /// Summary text, empty when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Schedule impact text, empty when absent.
    pub fn impact_text(&self) -> &str {
        self.suggested_schedule_impact.as_deref().unwrap_or("")
    }
}
