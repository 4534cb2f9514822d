//! Keyword intent detection for templated answers

use crate::corpus::FormInfo;
use serde::Serialize;

/// What the asker appears to want, judged from plain keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// "I need to file...", "what do I submit..."
    Need,
    /// "What form...", "which one..."
    Identify,
    /// "How do I...", "help me..."
    Explain,
    General,
}

const NEED_KEYWORDS: &[&str] = &["file", "need", "submit", "fill out"];
const IDENTIFY_KEYWORDS: &[&str] = &["what", "which", "what form"];
const EXPLAIN_KEYWORDS: &[&str] = &["how", "help", "explain"];

impl Intent {
    /// Case-insensitive substring match. Sets are tried in a fixed order and
    /// the first hit wins, so "what do I need" is `Need`.
    pub fn classify(query: &str) -> Self {
        let query = query.to_lowercase();
        let hit = |keywords: &[&str]| keywords.iter().any(|k| query.contains(k));

        if hit(NEED_KEYWORDS) {
            Intent::Need
        } else if hit(IDENTIFY_KEYWORDS) {
            Intent::Identify
        } else if hit(EXPLAIN_KEYWORDS) {
            Intent::Explain
        } else {
            Intent::General
        }
    }

    /// First sentence of a templated answer.
    pub fn opener(&self, info: &FormInfo) -> String {
        match self {
            Intent::Need => format!("You'll need **Form {}** ({}).", info.number, info.title),
            Intent::Identify => format!("That would be **Form {}** - {}.", info.number, info.title),
            Intent::Explain => format!(
                "Let me help you with **Form {}** ({}).",
                info.number, info.title
            ),
            Intent::General => format!("I found **Form {}**: {}.", info.number, info.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            Intent::classify("I need to file my personal income taxes"),
            Intent::Need
        );
        assert_eq!(Intent::classify("Which form reports wages?"), Intent::Identify);
        assert_eq!(Intent::classify("HOW do I report tips"), Intent::Explain);
        assert_eq!(Intent::classify("employer quarterly return"), Intent::General);
    }

    #[test]
    fn test_first_matching_set_wins() {
        // "what" and "need" both match; the need set is checked first
        assert_eq!(Intent::classify("what do I need"), Intent::Need);
        // "how" and "which" both match
        assert_eq!(Intent::classify("which shows how much"), Intent::Identify);
    }

    #[test]
    fn test_substring_not_word_match() {
        // "profile" contains "file"
        assert_eq!(Intent::classify("update my profile"), Intent::Need);
    }

    #[test]
    fn test_opener() {
        let info = FormInfo {
            number: "W-2".to_string(),
            title: "Wage and Tax Statement".to_string(),
            description: String::new(),
            use_cases: Vec::new(),
        };
        assert_eq!(
            Intent::Identify.opener(&info),
            "That would be **Form W-2** - Wage and Tax Statement."
        );
        assert_eq!(
            Intent::General.opener(&info),
            "I found **Form W-2**: Wage and Tax Statement."
        );
    }
}
