//! Practice platform lookup: a per-skill table with a level-keyed default.

use serde::Serialize;

use crate::assessment::level::ProficiencyLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeResource {
    pub title: String,
    pub url: String,
    pub description: String,
    pub platform: String,
}

struct Platform {
    url: &'static str,
    title: &'static str,
    description: &'static str,
    platform: &'static str,
}

const fn p(
    url: &'static str,
    title: &'static str,
    description: &'static str,
    platform: &'static str,
) -> Platform {
    Platform {
        url,
        title,
        description,
        platform,
    }
}

/// Beginner, intermediate, advanced.
type PlatformsByLevel = [Platform; 3];

const PRACTICE_PLATFORMS: &[(&str, PlatformsByLevel)] = &[
    (
        "python",
        [
            p(
                "https://www.hackerrank.com/domains/python",
                "HackerRank Python Basics",
                "Learn Python fundamentals through interactive challenges",
                "HackerRank",
            ),
            p(
                "https://www.codewars.com/collections/python-intermediate",
                "Codewars Python Intermediate Challenges",
                "Improve your Python skills with intermediate katas",
                "Codewars",
            ),
            p(
                "https://leetcode.com/problemset/all/?topicSlugs=python",
                "LeetCode Python Problems",
                "Solve complex algorithmic problems using Python",
                "LeetCode",
            ),
        ],
    ),
    (
        "javascript",
        [
            p(
                "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures/",
                "freeCodeCamp JavaScript Basics",
                "Learn JavaScript fundamentals through interactive lessons",
                "freeCodeCamp",
            ),
            p(
                "https://javascript30.com/",
                "JavaScript30 - 30 Day Challenge",
                "Build 30 things in 30 days with vanilla JavaScript",
                "JavaScript30",
            ),
            p(
                "https://github.com/trekhleb/javascript-algorithms",
                "JavaScript Algorithms and Data Structures",
                "Implement advanced algorithms and data structures in JavaScript",
                "GitHub",
            ),
        ],
    ),
    (
        "java",
        [
            p(
                "https://www.hackerrank.com/domains/java",
                "HackerRank Java Basics",
                "Learn Java fundamentals through interactive challenges",
                "HackerRank",
            ),
            p(
                "https://www.codegym.cc/",
                "CodeGym Java Course",
                "Practice-oriented Java programming course",
                "CodeGym",
            ),
            p(
                "https://www.baeldung.com/java-tutorials",
                "Baeldung Java Guides",
                "In-depth tutorials on advanced Java topics",
                "Baeldung",
            ),
        ],
    ),
    (
        "react",
        [
            p(
                "https://react-tutorial.app/",
                "React Tutorial App",
                "Interactive React tutorial for beginners",
                "React Tutorial",
            ),
            p(
                "https://www.frontendmentor.io/challenges?technologies=React",
                "Frontend Mentor React Challenges",
                "Real-world React projects to improve your skills",
                "Frontend Mentor",
            ),
            p(
                "https://github.com/alan2207/bulletproof-react",
                "Bulletproof React",
                "A simple, scalable, and powerful architecture for building production-ready React applications",
                "GitHub",
            ),
        ],
    ),
    (
        "node.js",
        [
            p(
                "https://nodeschool.io/",
                "NodeSchool Tutorials",
                "Self-guided workshops to learn Node.js",
                "NodeSchool",
            ),
            p(
                "https://www.freecodecamp.org/learn/back-end-development-and-apis/",
                "freeCodeCamp Back End Development",
                "Build APIs and microservices with Node.js",
                "freeCodeCamp",
            ),
            p(
                "https://github.com/goldbergyoni/nodebestpractices",
                "Node.js Best Practices",
                "Summary of the most important Node.js security best practices",
                "GitHub",
            ),
        ],
    ),
    (
        "sql",
        [
            p(
                "https://www.hackerrank.com/domains/sql",
                "HackerRank SQL Challenges",
                "Practice SQL queries with increasing difficulty",
                "HackerRank",
            ),
            p(
                "https://mode.com/sql-tutorial/",
                "Mode SQL Tutorial",
                "Comprehensive SQL tutorial with real-world examples",
                "Mode",
            ),
            p(
                "https://use-the-index-luke.com/",
                "Use The Index, Luke!",
                "A guide to database performance for developers",
                "Use The Index, Luke",
            ),
        ],
    ),
    (
        "machine learning",
        [
            p(
                "https://www.kaggle.com/learn/intro-to-machine-learning",
                "Kaggle Intro to Machine Learning",
                "Hands-on introduction to machine learning concepts",
                "Kaggle",
            ),
            p(
                "https://www.kaggle.com/competitions",
                "Kaggle Competitions",
                "Apply your skills to real-world machine learning problems",
                "Kaggle",
            ),
            p(
                "https://paperswithcode.com/",
                "Papers With Code",
                "Implement cutting-edge machine learning research papers",
                "Papers With Code",
            ),
        ],
    ),
    (
        "data analysis",
        [
            p(
                "https://www.kaggle.com/learn/pandas",
                "Kaggle Pandas Tutorial",
                "Learn data manipulation with Pandas",
                "Kaggle",
            ),
            p(
                "https://www.datacamp.com/tracks/data-analyst-with-python",
                "DataCamp Data Analyst Track",
                "Comprehensive data analysis course with Python",
                "DataCamp",
            ),
            p(
                "https://www.analyticsvidhya.com/blog/2018/08/comprehensive-guide-to-data-visualization-in-python/",
                "Advanced Data Visualization Guide",
                "Master complex data visualization techniques",
                "Analytics Vidhya",
            ),
        ],
    ),
];

const DEFAULT_PLATFORMS: PlatformsByLevel = [
    p(
        "https://www.freecodecamp.org/",
        "freeCodeCamp",
        "Learn to code with free interactive challenges",
        "freeCodeCamp",
    ),
    p(
        "https://exercism.org/",
        "Exercism",
        "Improve your coding skills with practice problems and mentorship",
        "Exercism",
    ),
    p(
        "https://www.codewars.com/",
        "Codewars",
        "Challenge yourself with coding katas",
        "Codewars",
    ),
];

fn level_index(level: ProficiencyLevel) -> usize {
    match level {
        ProficiencyLevel::Beginner => 0,
        ProficiencyLevel::Intermediate => 1,
        ProficiencyLevel::Advanced => 2,
    }
}

/// Skill table (case-insensitive) first, then the level default.
pub fn practice_platform(skill: &str, level: ProficiencyLevel) -> PracticeResource {
    let key = skill.trim().to_lowercase();
    let platforms = PRACTICE_PLATFORMS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, by_level)| by_level)
        .unwrap_or(&DEFAULT_PLATFORMS);

    let entry = &platforms[level_index(level)];
    PracticeResource {
        title: entry.title.to_string(),
        url: entry.url.to_string(),
        description: entry.description.to_string(),
        platform: entry.platform.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_skill_is_case_insensitive() {
        let lower = practice_platform("python", ProficiencyLevel::Advanced);
        let upper = practice_platform("PYTHON", ProficiencyLevel::Advanced);
        assert_eq!(lower, upper);
        assert_eq!(lower.title, "LeetCode Python Problems");
        assert_eq!(lower.platform, "LeetCode");
    }

    #[test]
    fn test_dotted_skill_name() {
        let node = practice_platform("Node.js", ProficiencyLevel::Beginner);
        assert_eq!(node.url, "https://nodeschool.io/");
    }

    #[test]
    fn test_unknown_skill_uses_level_default() {
        let beginner = practice_platform("Haskell", ProficiencyLevel::Beginner);
        assert_eq!(beginner.platform, "freeCodeCamp");
        let intermediate = practice_platform("Haskell", ProficiencyLevel::Intermediate);
        assert_eq!(intermediate.platform, "Exercism");
        let advanced = practice_platform("Haskell", ProficiencyLevel::Advanced);
        assert_eq!(advanced.platform, "Codewars");
    }
}
