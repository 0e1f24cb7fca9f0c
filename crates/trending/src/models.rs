use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::period::Period;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagTally {
    pub post_count: u64,
    pub engagement_sum: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub tag: String,
    pub post_count: u64,
    pub engagement_sum: u64,
}

impl RankedEntry {
    pub fn new(tag: impl Into<String>, post_count: u64, engagement_sum: u64) -> Self {
        Self {
            tag: tag.into(),
            post_count,
            engagement_sum,
        }
    }
}

/// Ranked hashtags for every period, computed from one snapshot of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingReport {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub today: Vec<RankedEntry>,
    pub week: Vec<RankedEntry>,
    pub month: Vec<RankedEntry>,
}

impl TrendingReport {
    pub fn empty(generated_at: OffsetDateTime) -> Self {
        Self {
            generated_at,
            today: Vec::new(),
            week: Vec::new(),
            month: Vec::new(),
        }
    }

    pub fn get(&self, period: Period) -> &[RankedEntry] {
        match period {
            Period::Today => &self.today,
            Period::Week => &self.week,
            Period::Month => &self.month,
        }
    }

    pub(crate) fn set(&mut self, period: Period, entries: Vec<RankedEntry>) {
        match period {
            Period::Today => self.today = entries,
            Period::Week => self.week = entries,
            Period::Month => self.month = entries,
        }
    }

    /// True when no period has any trend, i.e. the "no trends yet" state.
    pub fn is_empty(&self) -> bool {
        Period::ALL.iter().all(|period| self.get(*period).is_empty())
    }

    pub fn to_markdown(&self) -> String {
        let mut content = String::new();
        content.push_str("# Trending Topics\n\n");
        content.push_str(&format!("*Generated on {}*\n\n", self.generated_at.date()));

        for period in Period::ALL {
            content.push_str(&format!("## {}\n\n", period.title()));
            let entries = self.get(period);
            if entries.is_empty() {
                content.push_str("No trends yet.\n\n");
                continue;
            }
            content.push_str("| Rank | Tag | Posts | Engagement |\n");
            content.push_str("|------|-----|-------|------------|\n");
            for (index, entry) in entries.iter().enumerate() {
                content.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    index + 1,
                    entry.tag,
                    entry.post_count,
                    entry.engagement_sum
                ));
            }
            content.push('\n');
        }

        content
    }
}
