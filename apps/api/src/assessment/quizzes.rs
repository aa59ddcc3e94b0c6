//! Built-in multiple-choice quizzes and their grading.
//!
//! Quizzes are served without answers; a submission maps question ids to the
//! chosen option id and is graded one point per correct answer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assessment::store::QuizResult;

#[derive(Debug)]
pub struct QuizOption {
    pub id: &'static str,
    pub text: &'static str,
    pub correct: bool,
}

#[derive(Debug)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [QuizOption],
}

#[derive(Debug)]
pub struct Quiz {
    /// Lowercase path key, e.g. `javascript`.
    pub slug: &'static str,
    pub skill_name: &'static str,
    pub questions: &'static [Question],
}

const fn option(id: &'static str, text: &'static str, correct: bool) -> QuizOption {
    QuizOption { id, text, correct }
}

static QUIZZES: &[Quiz] = &[
    Quiz {
        slug: "javascript",
        skill_name: "JavaScript",
        questions: &[
            Question {
                id: "js1",
                text: "What is the correct way to declare a variable in JavaScript?",
                options: &[
                    option("js1a", "var x = 5;", false),
                    option("js1b", "let x = 5;", true),
                    option("js1c", "variable x = 5;", false),
                    option("js1d", "int x = 5;", false),
                ],
            },
            Question {
                id: "js2",
                text: "Which of the following is a JavaScript framework?",
                options: &[
                    option("js2a", "Django", false),
                    option("js2b", "Flask", false),
                    option("js2c", "React", true),
                    option("js2d", "Laravel", false),
                ],
            },
            Question {
                id: "js3",
                text: "What does the '===' operator do in JavaScript?",
                options: &[
                    option("js3a", "Assigns a value", false),
                    option("js3b", "Compares values only", false),
                    option("js3c", "Compares values and types", true),
                    option("js3d", "Logical AND operation", false),
                ],
            },
        ],
    },
    Quiz {
        slug: "python",
        skill_name: "Python",
        questions: &[
            Question {
                id: "py1",
                text: "What is the correct way to declare a list in Python?",
                options: &[
                    option("py1a", "list = [1, 2, 3]", true),
                    option("py1b", "list = (1, 2, 3)", false),
                    option("py1c", "list = {1, 2, 3}", false),
                    option("py1d", "array(1, 2, 3)", false),
                ],
            },
            Question {
                id: "py2",
                text: "Which of the following is a Python web framework?",
                options: &[
                    option("py2a", "Express", false),
                    option("py2b", "Django", true),
                    option("py2c", "React", false),
                    option("py2d", "Angular", false),
                ],
            },
            Question {
                id: "py3",
                text: "What does the 'len()' function do in Python?",
                options: &[
                    option("py3a", "Returns the length of an object", true),
                    option("py3b", "Returns the largest item in an iterable", false),
                    option("py3c", "Returns the smallest item in an iterable", false),
                    option("py3d", "Returns the last item in a list", false),
                ],
            },
        ],
    },
    Quiz {
        slug: "react",
        skill_name: "React",
        questions: &[
            Question {
                id: "r1",
                text: "What is JSX in React?",
                options: &[
                    option("r1a", "A database for React", false),
                    option("r1b", "A syntax extension for JavaScript", true),
                    option("r1c", "A React server", false),
                    option("r1d", "A testing framework", false),
                ],
            },
            Question {
                id: "r2",
                text: "Which hook is used for side effects in React?",
                options: &[
                    option("r2a", "useState", false),
                    option("r2b", "useContext", false),
                    option("r2c", "useEffect", true),
                    option("r2d", "useReducer", false),
                ],
            },
            Question {
                id: "r3",
                text: "What is the correct way to render a list in React?",
                options: &[
                    option("r3a", "Using a for loop inside JSX", false),
                    option("r3b", "Using map() function", true),
                    option("r3c", "Using a while loop", false),
                    option("r3d", "Using document.createElement()", false),
                ],
            },
        ],
    },
];

pub fn all_quizzes() -> &'static [Quiz] {
    QUIZZES
}

/// Case-insensitive lookup by slug.
pub fn find_quiz(slug: &str) -> Option<&'static Quiz> {
    let slug = slug.trim();
    QUIZZES.iter().find(|q| q.slug.eq_ignore_ascii_case(slug))
}

impl Quiz {
    /// One point per question whose chosen option is correct. Unanswered
    /// questions and unknown option ids score nothing.
    pub fn grade(&self, answers: &HashMap<String, String>) -> QuizResult {
        let score = self
            .questions
            .iter()
            .filter(|question| {
                answers.get(question.id).is_some_and(|chosen| {
                    question
                        .options
                        .iter()
                        .any(|o| o.correct && o.id == chosen.as_str())
                })
            })
            .count();

        QuizResult {
            skill_name: self.skill_name.to_string(),
            score: score as u32,
            max_score: self.questions.len() as u32,
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            slug: self.slug,
            skill_name: self.skill_name,
            question_count: self.questions.len(),
        }
    }

    /// The quiz as served to clients, with the answers left out.
    pub fn view(&self) -> QuizView {
        QuizView {
            slug: self.slug,
            skill_name: self.skill_name,
            questions: self
                .questions
                .iter()
                .map(|q| QuestionView {
                    id: q.id,
                    text: q.text,
                    options: q
                        .options
                        .iter()
                        .map(|o| OptionView { id: o.id, text: o.text })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub slug: &'static str,
    pub skill_name: &'static str,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    pub slug: &'static str,
    pub skill_name: &'static str,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: &'static str,
    pub text: &'static str,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub id: &'static str,
    pub text: &'static str,
}

/// Body of a quiz submission: question id → chosen option id.
#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(q, o)| (q.to_string(), o.to_string()))
            .collect()
    }

    #[test]
    fn test_every_question_has_exactly_one_correct_option() {
        for quiz in all_quizzes() {
            assert!(!quiz.questions.is_empty());
            for question in quiz.questions {
                let correct = question.options.iter().filter(|o| o.correct).count();
                assert_eq!(correct, 1, "{} in {}", question.id, quiz.slug);
            }
        }
    }

    #[test]
    fn test_find_quiz_ignores_case() {
        assert_eq!(find_quiz("Python").unwrap().skill_name, "Python");
        assert_eq!(find_quiz(" REACT ").unwrap().slug, "react");
        assert!(find_quiz("cobol").is_none());
    }

    #[test]
    fn test_grading_counts_correct_answers() {
        let quiz = find_quiz("javascript").unwrap();
        let result = quiz.grade(&answers(&[("js1", "js1b"), ("js2", "js2a"), ("js3", "js3c")]));
        assert_eq!(result.skill_name, "JavaScript");
        assert_eq!(result.score, 2);
        assert_eq!(result.max_score, 3);
    }

    #[test]
    fn test_unanswered_and_foreign_options_score_nothing() {
        let quiz = find_quiz("react").unwrap();
        let result = quiz.grade(&answers(&[("r1", "py1a"), ("zz", "r2c")]));
        assert_eq!(result.score, 0);
        assert_eq!(result.max_score, 3);
    }

    #[test]
    fn test_view_hides_answers() {
        let value = serde_json::to_value(find_quiz("python").unwrap().view()).unwrap();
        assert_eq!(value["skillName"], "Python");
        assert_eq!(value["questions"].as_array().unwrap().len(), 3);
        assert_eq!(value["questions"][0]["options"][0]["id"], "py1a");
        for question in value["questions"].as_array().unwrap() {
            for option in question["options"].as_array().unwrap() {
                assert_eq!(option.as_object().unwrap().len(), 2);
            }
        }
    }
}
