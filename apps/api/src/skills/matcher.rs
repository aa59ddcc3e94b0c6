//! Skill Matcher: scans resume text for catalog terms.
//!
//! Algorithm:
//! 1. Lowercase the text and split it into sentences on `.`, `!`, `?` runs that
//!    end a sentence (followed by whitespace or end of text, so `node.js` survives).
//! 2. Sentences carrying a skill indicator ("proficient in", "skills:", ...) form
//!    the search window; without any, the whole text is the window.
//! 3. Single-term pass: every catalog term, whole-word bounded, against the window.
//! 4. N-gram pass: every 2- and 3-word whitespace window of the FULL text that
//!    equals a catalog term exactly.
//! 5. Dedupe in first-seen order, capitalize for display, group by the first
//!    category (catalog order) that lists the term.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::skills::catalog::{self, SkillCategory, SKILL_INDICATORS};

/// Texts shorter than this (after trimming) are treated as a failed extraction.
pub const MIN_TEXT_CHARS: usize = 50;

/// A catalog term found in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedSkill {
    /// Display form, e.g. "Ruby On Rails".
    pub name: String,
    /// Lowercase catalog term, e.g. "ruby on rails".
    pub canonical: String,
    pub category: SkillCategory,
}

/// Ordered, deduplicated matcher output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillMatches {
    pub skills: Vec<ExtractedSkill>,
}

impl SkillMatches {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn display_names(&self) -> Vec<String> {
        self.skills.iter().map(|s| s.name.clone()).collect()
    }

    /// Category → display names, categories in catalog order.
    pub fn categorized(&self) -> BTreeMap<SkillCategory, Vec<String>> {
        let mut grouped: BTreeMap<SkillCategory, Vec<String>> = BTreeMap::new();
        for skill in &self.skills {
            grouped
                .entry(skill.category)
                .or_default()
                .push(skill.name.clone());
        }
        grouped
    }
}

/// Result of running extraction with the failure policy applied.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub success: bool,
    pub skills: Vec<String>,
    pub categorized_skills: BTreeMap<SkillCategory, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionOutcome {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            skills: vec![],
            categorized_skills: BTreeMap::new(),
            error: Some(message.to_string()),
        }
    }
}

/// Runs the matcher and converts "too little text" and "nothing found" into
/// failure outcomes. Never errors; the caller picks the transport status.
pub fn extract_skills(text: &str) -> ExtractionOutcome {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        tracing::warn!(
            chars = text.trim().chars().count(),
            "Extracted text is too short or empty"
        );
        return ExtractionOutcome::failure("Could not extract sufficient text from the resume");
    }

    let matches = match_skills(text);
    if matches.is_empty() {
        return ExtractionOutcome::failure("No skills found in the resume");
    }

    ExtractionOutcome {
        success: true,
        skills: matches.display_names(),
        categorized_skills: matches.categorized(),
        error: None,
    }
}

/// Pure matcher: no length policy, empty output when nothing matches.
pub fn match_skills(text: &str) -> SkillMatches {
    let lower = text.to_lowercase();
    let window = search_window(&lower);

    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut hits: Vec<&'static str> = Vec::new();

    for &(term, ref pattern) in term_patterns() {
        if pattern.is_match(&window) && seen.insert(term) {
            hits.push(term);
        }
    }

    let terms = catalog::term_set();
    let words: Vec<&str> = lower.split_whitespace().collect();
    for ngram in ngrams(&words) {
        if let Some(&term) = terms.get(ngram.as_str()) {
            if seen.insert(term) {
                hits.push(term);
            }
        }
    }

    let skills = hits
        .into_iter()
        .filter_map(|term| {
            catalog::category_of(term).map(|category| ExtractedSkill {
                name: capitalize_words(term),
                canonical: term.to_string(),
                category,
            })
        })
        .collect();

    SkillMatches { skills }
}

/// Concatenation of indicator sentences, or the whole text when there are none.
fn search_window(lower: &str) -> String {
    let skill_sentences: Vec<&str> = split_sentences(lower)
        .into_iter()
        .filter(|sentence| SKILL_INDICATORS.iter().any(|i| sentence.contains(i)))
        .collect();

    if skill_sentences.is_empty() {
        lower.to_string()
    } else {
        skill_sentences.join(" ")
    }
}

pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    let re = SENTENCE_END
        .get_or_init(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence pattern is valid"));
    re.split(text).filter(|s| !s.trim().is_empty()).collect()
}

/// Contiguous 2- and 3-word windows, in text order.
fn ngrams(words: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for i in 0..words.len().saturating_sub(1) {
        out.push(format!("{} {}", words[i], words[i + 1]));
        if i + 2 < words.len() {
            out.push(format!("{} {} {}", words[i], words[i + 1], words[i + 2]));
        }
    }
    out
}

/// Whole-word pattern for every catalog term. A boundary is text start/end or
/// any non-word character, so terms with symbols (`c++`, `c#`) still match.
fn term_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        catalog::all_terms()
            .iter()
            .map(|term| {
                let pattern = whole_word_pattern(term);
                (*term, Regex::new(&pattern).expect("escaped term is a valid pattern"))
            })
            .collect()
    })
}

pub(crate) fn whole_word_pattern(term: &str) -> String {
    format!(r"(?:^|\W)({})(?:\W|$)", regex::escape(term))
}

/// Uppercases the first character of every space-separated word.
pub fn capitalize_words(term: &str) -> String {
    term.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "I am proficient in Python and have experience with React and Node.js";

    fn canonical(matches: &SkillMatches) -> Vec<&str> {
        matches.skills.iter().map(|s| s.canonical.as_str()).collect()
    }

    #[test]
    fn test_sample_sentence_finds_core_skills() {
        let matches = match_skills(SAMPLE);
        let found = canonical(&matches);
        for expected in ["python", "react", "node.js"] {
            assert!(found.contains(&expected), "missing {expected} in {found:?}");
        }
        let names = matches.display_names();
        assert!(names.contains(&"Python".to_string()));
        assert!(names.contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_matching_is_idempotent() {
        assert_eq!(match_skills(SAMPLE), match_skills(SAMPLE));
        let text = "Skills: Rust, Go, Docker. Led a team of five and practiced scrum daily.";
        assert_eq!(match_skills(text), match_skills(text));
    }

    #[test]
    fn test_whole_word_boundaries() {
        let matches = match_skills("Worked with javascript every day for many, many years now.");
        let found = canonical(&matches);
        assert!(found.contains(&"javascript"));
        assert!(!found.contains(&"java"), "java must not match inside javascript");
    }

    #[test]
    fn test_symbol_terms_match() {
        let found_text = "Technologies: C++, C# and Objective-C on embedded targets and desktops";
        let matches = match_skills(found_text);
        let found = canonical(&matches);
        assert!(found.contains(&"c++"));
        assert!(found.contains(&"c#"));
        assert!(found.contains(&"objective-c"));
    }

    #[test]
    fn test_indicator_sentences_restrict_single_term_pass() {
        let text = "Hobbies include kotlin tutorials. Proficient in rust and systems work!";
        let found_matches = match_skills(text);
        let found = canonical(&found_matches);
        assert!(found.contains(&"rust"));
        assert!(!found.contains(&"kotlin"), "kotlin lies outside the indicator sentence");
    }

    #[test]
    fn test_without_indicators_whole_text_is_searched() {
        let text = "Ten years of kotlin. Also rust on weekends.";
        let found_matches = match_skills(text);
        let found = canonical(&found_matches);
        assert!(found.contains(&"kotlin"));
        assert!(found.contains(&"rust"));
    }

    #[test]
    fn test_ngram_pass_reads_full_text_with_exact_equality() {
        // "machine learning" sits outside the indicator sentence, so only the
        // n-gram pass over the full text can find it.
        let text = "Research on machine learning and robots. Skills: python";
        let found_matches = match_skills(text);
        let found = canonical(&found_matches);
        assert!(found.contains(&"machine learning"));
        assert!(found.contains(&"python"));
        assert!(!found.contains(&"research"));

        // Punctuation glued to a token breaks exact n-gram equality.
        let text = "Research on (machine learning) topics. Skills: python";
        let found_matches = match_skills(text);
        assert!(!canonical(&found_matches).contains(&"machine learning"));
    }

    #[test]
    fn test_results_are_deduplicated() {
        let text = "Skills: python, python, PYTHON and Python";
        let matches = match_skills(text);
        let pythons = matches
            .skills
            .iter()
            .filter(|s| s.canonical == "python")
            .count();
        assert_eq!(pythons, 1);
    }

    #[test]
    fn test_shared_terms_file_under_first_category() {
        let matches = match_skills("Skills: sql and firebase");
        let grouped = matches.categorized();
        assert_eq!(
            grouped.get(&SkillCategory::ProgrammingLanguages),
            Some(&vec!["Sql".to_string()])
        );
        assert_eq!(
            grouped.get(&SkillCategory::Databases),
            Some(&vec!["Firebase".to_string()])
        );
        assert!(!grouped.contains_key(&SkillCategory::Tools));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let matches = match_skills("zzz qqq xxx");
        assert!(matches.is_empty());
        assert!(matches.categorized().is_empty());
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("ruby on rails"), "Ruby On Rails");
        assert_eq!(capitalize_words("node.js"), "Node.js");
        assert_eq!(capitalize_words("ci/cd"), "Ci/cd");
        assert_eq!(capitalize_words("c++"), "C++");
    }

    #[test]
    fn test_sentence_split_keeps_dotted_terms() {
        let sentences = split_sentences("built apis in node.js. shipped asp.net apps! done?");
        assert_eq!(
            sentences,
            vec!["built apis in node.js", "shipped asp.net apps", "done"]
        );
    }

    #[test]
    fn test_ngrams_cover_pairs_and_triples() {
        let grams = ngrams(&["a", "b", "c"]);
        assert_eq!(grams, vec!["a b", "a b c", "b c"]);
        assert!(ngrams(&["solo"]).is_empty());
        assert!(ngrams(&[]).is_empty());
    }

    #[test]
    fn test_extract_skills_short_text_fails() {
        let outcome = extract_skills("Python, React");
        assert!(!outcome.success);
        assert!(outcome.skills.is_empty());
        assert_eq!(
            outcome.error.as_deref(),
            Some("Could not extract sufficient text from the resume")
        );
    }

    #[test]
    fn test_extract_skills_without_hits_fails() {
        let outcome = extract_skills(
            "Quiet afternoons spent reading novels by the lake, watching the ducks float by.",
        );
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("No skills found in the resume"));
    }

    #[test]
    fn test_extract_skills_success_shape() {
        let outcome = extract_skills(SAMPLE);
        assert!(outcome.success);
        assert!(outcome.error.is_none());
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["categorized_skills"]["web_development"].is_array());
        assert!(json.get("error").is_none());
    }
}
