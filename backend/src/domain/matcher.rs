//! Linear FAQ matcher.
//!
//! A query matches a FAQ when the FAQ's question, lower-cased, contains the
//! trimmed lower-cased query as a substring. The containment direction is
//! load-bearing: a query that is a superstring of a question never matches.
//! First match in candidate order wins.

use crate::domain::faq::FaqCandidate;

/// Return the first candidate whose question contains `query`, or `None`.
pub fn first_match<'a>(query: &str, candidates: &'a [FaqCandidate]) -> Option<&'a FaqCandidate> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|candidate| candidate.question.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn candidates() -> Vec<FaqCandidate> {
        vec![
            FaqCandidate {
                id: 1,
                question: "What is FastAPI?".to_owned(),
                answer: "A web framework.".to_owned(),
            },
            FaqCandidate {
                id: 2,
                question: "How do I reset my password?".to_owned(),
                answer: "Use the portal settings page.".to_owned(),
            },
            FaqCandidate {
                id: 3,
                question: "What is FastAPI used for?".to_owned(),
                answer: "Building APIs.".to_owned(),
            },
        ]
    }

    #[rstest]
    #[case("fastapi", Some(1))]
    #[case("FASTAPI", Some(1))]
    #[case("  reset my password  ", Some(2))]
    #[case("library hours", None)]
    fn matches_case_insensitive_substrings(#[case] query: &str, #[case] expected: Option<i64>) {
        let candidates = candidates();
        let hit = first_match(query, &candidates);
        assert_eq!(hit.map(|faq| faq.id), expected);
    }

    #[test]
    fn first_candidate_wins_on_ties() {
        let candidates = candidates();
        let hit = first_match("what is fastapi", &candidates).expect("both 1 and 3 contain it");
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn superstring_queries_do_not_match() {
        // "what is fastapi? please help" contains the question, not the other
        // way round, so the scan must miss.
        let candidates = candidates();
        assert!(first_match("what is fastapi? please help me", &candidates).is_none());
    }

    #[test]
    fn blank_queries_never_match() {
        let candidates = candidates();
        assert!(first_match("   ", &candidates).is_none());
    }
}
