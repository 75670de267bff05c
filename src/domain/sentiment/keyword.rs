//! Model-free keyword heuristic for single texts

const POSITIVE: [&str; 4] = ["good", "great", "awesome", "love"];
const NEGATIVE: [&str; 4] = ["bad", "terrible", "hate", "awful"];

/// Case-insensitive substring match; positive words win over negative ones
pub fn keyword_sentiment(text: &str) -> &'static str {
    let text = text.to_lowercase();

    if POSITIVE.iter().any(|word| text.contains(word)) {
        "positive"
    } else if NEGATIVE.iter().any(|word| text.contains(word)) {
        "negative"
    } else {
        "neutral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_sentiment() {
        assert_eq!(keyword_sentiment("This is GREAT"), "positive");
        assert_eq!(keyword_sentiment("awful pacing"), "negative");
        assert_eq!(keyword_sentiment("it exists"), "neutral");
        assert_eq!(keyword_sentiment(""), "neutral");
    }

    #[test]
    fn test_positive_checked_first() {
        assert_eq!(keyword_sentiment("I love to hate this"), "positive");
    }

    #[test]
    fn test_matches_inside_words() {
        // "goodbye" contains "good"
        assert_eq!(keyword_sentiment("goodbye"), "positive");
        assert_eq!(keyword_sentiment("badge"), "negative");
    }
}
