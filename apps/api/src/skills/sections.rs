//! Education and experience lines pulled from resume text with keyword patterns.
//!
//! Resumes are line oriented, so each non-blank line is treated as one sentence.
//! A line yields an entry only when its primary field (degree or institution,
//! job title or company) is found.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "doctorate", "bs", "ms", "ba", "ma", "mba", "btech", "mtech",
    "b.tech", "m.tech", "b.e.", "m.e.", "b.s.", "m.s.", "b.a.", "m.a.", "ph.d", "associate",
    "diploma", "certification", "certificate", "degree",
];

const INSTITUTION_KEYWORDS: &[&str] = &["university", "college", "institute", "school", "academy"];

const JOB_TITLE_KEYWORDS: &[&str] = &[
    "engineer", "developer", "manager", "director", "analyst", "specialist", "consultant",
    "coordinator", "administrator", "assistant", "associate", "lead", "senior", "junior",
    "intern", "architect", "designer", "technician", "officer", "head", "chief",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub years: Option<String>,
}

struct Patterns {
    degrees: Vec<Regex>,
    institutions: Vec<Regex>,
    titles: Vec<Regex>,
    in_or_at: Regex,
    clause_end: Regex,
    year: Regex,
    company: Regex,
    year_range: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let keyword_set = |words: &[&str]| -> Vec<Regex> {
            words
                .iter()
                .map(|w| Regex::new(&keyword_pattern(w)).expect("keyword pattern is valid"))
                .collect()
        };
        Patterns {
            degrees: keyword_set(DEGREE_KEYWORDS),
            institutions: keyword_set(INSTITUTION_KEYWORDS),
            titles: keyword_set(JOB_TITLE_KEYWORDS),
            in_or_at: Regex::new(r"\b(?:in|at)\b").expect("valid"),
            clause_end: Regex::new(r"[,.]").expect("valid"),
            year: Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid"),
            company: Regex::new(r"\bat\s+(.*?)(?:\bfrom\b|\bin\b|,|\.|$)").expect("valid"),
            year_range: Regex::new(
                r"\b(?:19|20)\d{2}\s*[-–—]\s*(?:(?:19|20)\d{2}\b|present\b)",
            )
            .expect("valid"),
        }
    })
}

/// Whole-word keyword with an optional plural `s`; group 1 is the keyword.
fn keyword_pattern(word: &str) -> String {
    format!(r"(?:^|\W)({}s?)(?:\W|$)", regex::escape(word))
}

/// Finds the first keyword in `sentence` and returns the text from it up to
/// the first match of `stop` after the keyword (or the end of the sentence).
fn phrase_from_keyword(sentence: &str, keywords: &[Regex], stop: &Regex) -> Option<String> {
    keywords.iter().find_map(|kw| {
        let hit = kw.captures(sentence)?.get(1)?;
        let tail = &sentence[hit.end()..];
        let end = stop
            .find(tail)
            .map(|m| hit.end() + m.start())
            .unwrap_or(sentence.len());
        let phrase = sentence[hit.start()..end].trim();
        (!phrase.is_empty()).then(|| phrase.to_string())
    })
}

fn lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
}

pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    let p = patterns();
    lines(text)
        .filter(|line| {
            p.degrees.iter().any(|r| r.is_match(line))
                || p.institutions.iter().any(|r| r.is_match(line))
        })
        .filter_map(|line| {
            let degree = phrase_from_keyword(&line, &p.degrees, &p.in_or_at);
            let institution = phrase_from_keyword(&line, &p.institutions, &p.clause_end);
            let year = p.year.find(&line).map(|m| m.as_str().to_string());
            (degree.is_some() || institution.is_some()).then_some(EducationEntry {
                degree,
                institution,
                year,
            })
        })
        .collect()
}

pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let p = patterns();
    lines(text)
        .filter(|line| p.titles.iter().any(|r| r.is_match(line)))
        .filter_map(|line| {
            let job_title = phrase_from_keyword(&line, &p.titles, &p.in_or_at);
            let company = p
                .company
                .captures(&line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|c| !c.is_empty());
            let years = p.year_range.find(&line).map(|m| m.as_str().to_string());
            (job_title.is_some() || company.is_some()).then_some(ExperienceEntry {
                job_title,
                company,
                years,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
Jane Doe
Senior Software Engineer at Acme Corp, 2018 - present
Data Analyst at Globex from 2015 - 2018
Bachelor of Science in Computer Science
Stanford University, 2014
Hobbies: climbing, chess";

    #[test]
    fn test_extracts_education_lines() {
        let education = extract_education(RESUME);
        assert_eq!(education.len(), 2);

        assert_eq!(education[0].degree.as_deref(), Some("bachelor of science"));
        assert_eq!(education[0].institution, None);

        assert_eq!(education[1].institution.as_deref(), Some("university"));
        assert_eq!(education[1].year.as_deref(), Some("2014"));
    }

    #[test]
    fn test_extracts_experience_lines() {
        let experience = extract_experience(RESUME);
        assert_eq!(experience.len(), 2);

        assert_eq!(experience[0].job_title.as_deref(), Some("engineer"));
        assert_eq!(experience[0].company.as_deref(), Some("acme corp"));
        assert_eq!(experience[0].years.as_deref(), Some("2018 - present"));

        assert_eq!(experience[1].job_title.as_deref(), Some("analyst"));
        assert_eq!(experience[1].company.as_deref(), Some("globex"));
        assert_eq!(experience[1].years.as_deref(), Some("2015 - 2018"));
    }

    #[test]
    fn test_plural_keyword_matches() {
        let education = extract_education("Masters in Data Science, 2020");
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].degree.as_deref(), Some("masters"));
        assert_eq!(education[0].year.as_deref(), Some("2020"));
    }

    #[test]
    fn test_no_keywords_yields_nothing() {
        assert!(extract_education("Hobbies: climbing, chess").is_empty());
        assert!(extract_experience("Hobbies: climbing, chess").is_empty());
    }
}
