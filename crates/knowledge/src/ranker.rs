//! Keyword-overlap ranking of corpus URLs.
//!
//! Query tokens are expanded through topic keyword sets (a query mentioning
//! "bursar" also looks for "tuition" pages), then each URL scores one point per
//! expanded keyword it contains. Personnel pages get a flat boost because a
//! person's name rarely overlaps with the URL of their faculty page.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

/// Result cap for scored retrieval feeding the context assembler.
pub const SCORED_LIMIT: usize = 8;

/// Result cap for plain "which pages look relevant" listings.
pub const LISTING_LIMIT: usize = 5;

/// Bonus for URLs that look like faculty or staff directory pages.
const PERSONNEL_BOOST: u32 = 2;
const PERSONNEL_MARKERS: &[&str] = &["faculty", "people", "staff"];

/// A topic label and the substrings that indicate it.
#[derive(Debug)]
pub struct KeywordPattern {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
}

pub static KEYWORD_PATTERNS: &[KeywordPattern] = &[
    KeywordPattern { topic: "admission", keywords: &["admission", "apply", "enroll"] },
    KeywordPattern { topic: "tuition", keywords: &["tuition", "cost", "fee", "bursar", "financial"] },
    KeywordPattern { topic: "financial", keywords: &["financial", "aid", "scholarship", "bursar"] },
    KeywordPattern { topic: "program", keywords: &["program", "academic", "degree", "major"] },
    KeywordPattern { topic: "course", keywords: &["course", "class", "schedule", "registrar"] },
    KeywordPattern { topic: "housing", keywords: &["housing", "residence", "dorm"] },
    KeywordPattern { topic: "parking", keywords: &["parking", "transportation"] },
    KeywordPattern {
        topic: "library",
        keywords: &[
            "library", "libguide", "libguides", "circulation", "reserves", "reserve", "book",
            "borrow", "checkout", "printing", "print", "3d", "werc", "policy", "librarian",
            "research", "hours", "schurz", "subject-librarian", "research-support", "wideformat",
            "room", "study", "room-reservation",
        ],
    },
    KeywordPattern { topic: "career", keywords: &["career", "job", "internship", "handshake"] },
    KeywordPattern { topic: "transfer", keywords: &["transfer"] },
    KeywordPattern { topic: "graduate", keywords: &["graduate", "grad", "master"] },
    KeywordPattern { topic: "international", keywords: &["international", "oiss", "visa"] },
    KeywordPattern { topic: "calendar", keywords: &["calendar", "schedule", "date"] },
    KeywordPattern { topic: "contact", keywords: &["contact", "phone", "email"] },
    KeywordPattern { topic: "visit", keywords: &["visit", "tour", "campus"] },
    KeywordPattern { topic: "student", keywords: &["student", "service"] },
    KeywordPattern { topic: "orientation", keywords: &["orientation", "new-student"] },
    KeywordPattern {
        topic: "faculty",
        keywords: &["faculty", "professor", "staff", "directory", "people", "dr", "doctor"],
    },
    KeywordPattern {
        topic: "computer",
        keywords: &[
            "computer", "computer-science", "computer-science-informatics", "cs", "computing",
            "informatics", "clas",
        ],
    },
    KeywordPattern { topic: "math", keywords: &["math", "mathematics", "applied"] },
    KeywordPattern { topic: "business", keywords: &["business", "mba", "accounting", "management"] },
    KeywordPattern { topic: "nursing", keywords: &["nursing", "health", "nurse"] },
    KeywordPattern { topic: "education", keywords: &["education", "teaching", "teacher"] },
    KeywordPattern { topic: "arts", keywords: &["arts", "music", "theatre", "art", "performance"] },
];

/// A corpus URL with its score for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredUrl {
    pub url: String,
    pub score: u32,
}

/// Selects the corpus URLs most likely to answer a query.
#[derive(Debug, Clone)]
pub struct RelevanceRanker {
    patterns: &'static [KeywordPattern],
    limit: usize,
}

impl RelevanceRanker {
    /// A ranker over the built-in keyword table returning at most `limit` URLs.
    pub fn new(limit: usize) -> Self {
        Self {
            patterns: KEYWORD_PATTERNS,
            limit,
        }
    }

    /// The keyword set a query expands to.
    ///
    /// A token selects a pattern when one of the pattern's keywords occurs
    /// inside the token (an exact match is the trivial case). When no token
    /// selects anything, the raw tokens are used so a specific but unknown
    /// term can still match URLs literally.
    pub fn expand(&self, query: &str) -> BTreeSet<String> {
        let query = query.to_lowercase();
        let tokens: Vec<&str> = query.split_whitespace().collect();

        let mut matched = BTreeSet::new();
        for token in &tokens {
            for pattern in self.patterns {
                if pattern.keywords.iter().any(|k| token.contains(k)) {
                    matched.extend(pattern.keywords.iter().map(|k| k.to_string()));
                }
            }
        }

        if matched.is_empty() {
            matched.extend(tokens.iter().map(|t| t.to_string()));
        }
        matched
    }

    /// Every corpus URL with a positive score, best first. Equal scores keep
    /// corpus order.
    pub fn score(&self, query: &str, corpus: &[String]) -> Vec<ScoredUrl> {
        let keywords = self.expand(query);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredUrl> = corpus
            .iter()
            .filter_map(|url| {
                let lower = url.to_lowercase();
                let mut score = keywords.iter().filter(|k| lower.contains(k.as_str())).count() as u32;
                if PERSONNEL_MARKERS.iter().any(|m| lower.contains(m)) {
                    score += PERSONNEL_BOOST;
                }
                (score > 0).then(|| ScoredUrl {
                    url: url.clone(),
                    score,
                })
            })
            .collect();

        // `sort_by` is stable.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.limit);

        debug!(
            keywords = keywords.len(),
            candidates = corpus.len(),
            selected = scored.len(),
            "Ranked corpus URLs"
        );
        scored
    }

    /// The top URLs for `query`, best first.
    pub fn rank(&self, query: &str, corpus: &[String]) -> Vec<String> {
        self.score(query, corpus).into_iter().map(|s| s.url).collect()
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(SCORED_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(urls: &[&str]) -> Vec<String> {
        urls.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn patterns_are_non_empty() {
        assert!(KEYWORD_PATTERNS.iter().all(|p| !p.keywords.is_empty()));
    }

    #[test]
    fn token_expands_to_whole_topic_set() {
        let keywords = RelevanceRanker::default().expand("Where is the bursar?");
        assert!(keywords.contains("tuition"));
        assert!(keywords.contains("scholarship"));
    }

    #[test]
    fn unmatched_tokens_fall_back_to_literals() {
        let keywords = RelevanceRanker::default().expand("zzyzx quux");
        assert_eq!(keywords, BTreeSet::from(["zzyzx".to_string(), "quux".to_string()]));
    }

    #[test]
    fn no_overlap_yields_empty_ranking() {
        let urls = corpus(&["https://www.iusb.edu/about.html", "https://www.iusb.edu/news/"]);
        assert!(RelevanceRanker::default().rank("zzyzx quux", &urls).is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty_ranking() {
        let ranker = RelevanceRanker::default();
        assert!(ranker.rank("tuition", &[]).is_empty());
        assert!(ranker.rank("", &corpus(&["https://www.iusb.edu/"])).is_empty());
    }

    #[test]
    fn output_respects_cap() {
        let urls: Vec<String> = (0..50)
            .map(|i| format!("https://www.iusb.edu/tuition/page-{i}.html"))
            .collect();
        assert_eq!(RelevanceRanker::new(SCORED_LIMIT).rank("tuition", &urls).len(), 8);
        assert_eq!(RelevanceRanker::new(LISTING_LIMIT).rank("tuition", &urls).len(), 5);
    }

    #[test]
    fn personnel_page_breaks_equal_base_score() {
        let urls = corpus(&[
            "https://www.iusb.edu/nursing/overview.html",
            "https://www.iusb.edu/nursing/people.html",
        ]);
        let scored = RelevanceRanker::default().score("nursing", &urls);
        assert_eq!(scored[0].url, urls[1]);
        assert!(scored[0].score > scored[1].score);
    }

    #[test]
    fn ties_keep_corpus_order() {
        let urls = corpus(&[
            "https://www.iusb.edu/housing/b.html",
            "https://www.iusb.edu/housing/a.html",
        ]);
        assert_eq!(RelevanceRanker::default().rank("housing", &urls), urls);
    }

    #[test]
    fn doctor_query_prefers_people_page() {
        let urls = corpus(&[
            "https://clas.iusb.edu/about.html",
            "https://clas.iusb.edu/people/biology-smith.html",
        ]);
        let ranked = RelevanceRanker::default().rank("tell me about Dr. Smith in biology", &urls);
        assert_eq!(ranked.first().map(String::as_str), Some(urls[1].as_str()));
    }

    #[test]
    fn scores_count_each_matched_keyword() {
        let urls = corpus(&["https://administration.iusb.edu/bursar/tuition-fee.html"]);
        let scored = RelevanceRanker::default().score("bursar", &urls);
        // bursar, tuition, fee
        assert_eq!(scored[0].score, 3);
    }
}
