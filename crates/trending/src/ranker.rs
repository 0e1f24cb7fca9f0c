use indexmap::IndexMap;

use crate::models::{RankedEntry, TagTally};

/// Orders tallies by engagement sum, highest first, and keeps at most
/// `limit` entries. Ties keep the mapping's iteration order.
pub fn rank(tallies: &IndexMap<String, TagTally>, limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = tallies
        .iter()
        .map(|(tag, tally)| RankedEntry::new(tag.clone(), tally.post_count, tally.engagement_sum))
        .collect();

    entries.sort_by(|a, b| b.engagement_sum.cmp(&a.engagement_sum));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tallies(pairs: &[(&str, u64)]) -> IndexMap<String, TagTally> {
        pairs
            .iter()
            .map(|(tag, sum)| {
                (
                    tag.to_string(),
                    TagTally { post_count: 1, engagement_sum: *sum },
                )
            })
            .collect()
    }

    #[test]
    fn test_truncates_to_highest_engagement() {
        let input = tallies(&[
            ("#a", 3), ("#b", 80), ("#c", 12), ("#d", 41),
            ("#e", 7), ("#f", 99), ("#g", 25), ("#h", 1),
        ]);
        let ranked = rank(&input, 5);
        let tags: Vec<&str> = ranked.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["#f", "#b", "#d", "#g", "#c"]);
    }

    #[test]
    fn test_ties_keep_encounter_order_and_ranking_is_idempotent() {
        let input = tallies(&[("#x", 5), ("#y", 9), ("#z", 5)]);
        let first = rank(&input, 5);
        let second = rank(&input, 5);
        assert_eq!(first, second);
        let tags: Vec<&str> = first.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["#y", "#x", "#z"]);
    }

    #[test]
    fn test_empty_mapping_ranks_to_empty_list() {
        assert!(rank(&IndexMap::new(), 5).is_empty());
    }
}
