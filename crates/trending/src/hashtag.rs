use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;

fn hashtag_regex() -> &'static Regex {
    static HASHTAG: OnceLock<Regex> = OnceLock::new();
    HASHTAG.get_or_init(|| Regex::new(r"#\w+").expect("hashtag pattern is valid"))
}

/// Distinct lower-cased hashtags in `body`, in order of first occurrence.
///
/// `\w` is Unicode-aware here, so `#café` and `#スカイライン` are whole tags
/// rather than being cut at the first non-ASCII letter.
pub fn extract_hashtags(body: Option<&str>) -> Vec<String> {
    let Some(body) = body else {
        return Vec::new();
    };

    hashtag_regex()
        .find_iter(body)
        .map(|m| m.as_str().to_lowercase())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_lowercased_tags_in_order() {
        let tags = extract_hashtags(Some("Great day at the #meetup in #Dubai"));
        assert_eq!(tags, vec!["#meetup", "#dubai"]);
    }

    #[test]
    fn test_duplicates_collapse_regardless_of_case() {
        let tags = extract_hashtags(Some("#EV #ev charging is #Ev life"));
        assert_eq!(tags, vec!["#ev"]);
    }

    #[test]
    fn test_empty_and_missing_bodies() {
        assert!(extract_hashtags(None).is_empty());
        assert!(extract_hashtags(Some("")).is_empty());
        assert!(extract_hashtags(Some("no tags here, just a # sign")).is_empty());
    }

    #[test]
    fn test_word_characters_end_a_tag() {
        let tags = extract_hashtags(Some("#v8_swap, #drift! #jdm-life #スカイライン #Café"));
        assert_eq!(tags, vec!["#v8_swap", "#drift", "#jdm", "#スカイライン", "#café"]);
    }
}
