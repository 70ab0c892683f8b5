// ── Topic Suggestions ─────────────────────────────────────────────────────────
//
// After each reply the page offers a few follow-up prompts built from the
// reply's longer words.

use rand::seq::SliceRandom;
use rand::Rng;

/// How many follow-ups to offer.
const SUGGESTION_COUNT: usize = 3;
/// Words this short carry too little meaning to ask about.
const MIN_WORD_CHARS: usize = 5;

/// Up to three "Tell me more about ..." prompts from the reply.
pub fn suggest_followups(reply: &str) -> Vec<String> {
    suggest_followups_with(reply, &mut rand::thread_rng())
}

/// Deterministic variant with an injected rng.
pub fn suggest_followups_with<R: Rng + ?Sized>(reply: &str, rng: &mut R) -> Vec<String> {
    let mut words: Vec<&str> = reply
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
        .collect();
    words.shuffle(rng);
    words
        .into_iter()
        .take(SUGGESTION_COUNT)
        .map(|w| format!("Tell me more about {}", w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn at_most_three_suggestions() {
        let reply = "ownership borrowing lifetimes traits generics modules crates";
        let suggestions = suggest_followups(reply);
        assert_eq!(suggestions.len(), 3);
        for s in &suggestions {
            assert!(s.starts_with("Tell me more about "));
        }
    }

    #[test]
    fn short_words_are_skipped() {
        let suggestions = suggest_followups("a to the of in it is and");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn fewer_long_words_means_fewer_suggestions() {
        let suggestions = suggest_followups("only ownership here");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0], "Tell me more about ownership");
    }

    #[test]
    fn empty_reply_yields_nothing() {
        assert!(suggest_followups("").is_empty());
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let reply = "ownership borrowing lifetimes traits generics";
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(
            suggest_followups_with(reply, &mut a),
            suggest_followups_with(reply, &mut b)
        );
    }

    #[test]
    fn suggestions_come_from_the_reply() {
        let reply = "ownership borrowing lifetimes";
        for s in suggest_followups(reply) {
            let word = s.strip_prefix("Tell me more about ").unwrap();
            assert!(reply.contains(word));
        }
    }
}
