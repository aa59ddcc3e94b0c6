//! Canned learning-path checklists, keyed by catalog category and level.

use crate::assessment::level::ProficiencyLevel;
use crate::skills::catalog::{category_of, SkillCategory};

type LevelSteps = [&'static [&'static str]; 3];

const DEFAULT_PATH: LevelSteps = [
    &[
        "Learn the fundamentals and basic concepts",
        "Complete introductory tutorials and exercises",
        "Build simple projects to apply what you've learned",
        "Join communities and forums to ask questions",
    ],
    &[
        "Deepen your understanding of advanced concepts",
        "Work on more complex projects",
        "Learn best practices and optimization techniques",
        "Contribute to open source or collaborate with others",
    ],
    &[
        "Master specialized topics and techniques",
        "Build production-ready applications",
        "Teach others and contribute to the community",
        "Stay updated with the latest developments",
    ],
];

const PROGRAMMING_LANGUAGES_PATH: LevelSteps = [
    &[
        "Learn syntax and basic data structures",
        "Understand control flow (loops, conditionals)",
        "Practice with simple coding exercises",
        "Build small command-line applications",
    ],
    &[
        "Learn object-oriented programming principles",
        "Understand algorithms and data structures",
        "Work with libraries and frameworks",
        "Build more complex applications",
    ],
    &[
        "Master advanced language features",
        "Optimize code for performance",
        "Understand memory management",
        "Contribute to language libraries or tools",
    ],
];

const WEB_DEVELOPMENT_PATH: LevelSteps = [
    &[
        "Learn HTML, CSS, and basic JavaScript",
        "Understand responsive design principles",
        "Build static websites",
        "Learn to use developer tools",
    ],
    &[
        "Master JavaScript and frameworks",
        "Learn backend development and databases",
        "Build full-stack web applications",
        "Implement authentication and API integration",
    ],
    &[
        "Optimize for performance and accessibility",
        "Implement advanced state management",
        "Master serverless and microservices architecture",
        "Build scalable, production-ready applications",
    ],
];

const DATA_SCIENCE_PATH: LevelSteps = [
    &[
        "Learn Python or R programming basics",
        "Understand data manipulation and cleaning",
        "Master basic statistics and visualization",
        "Complete guided data analysis projects",
    ],
    &[
        "Learn machine learning algorithms",
        "Understand feature engineering",
        "Work with larger datasets",
        "Participate in data science competitions",
    ],
    &[
        "Master deep learning and neural networks",
        "Implement complex models from research papers",
        "Deploy models to production",
        "Contribute to cutting-edge research",
    ],
];

/// Category table first, then the default table.
fn table_for(category: Option<SkillCategory>) -> &'static LevelSteps {
    match category {
        Some(SkillCategory::ProgrammingLanguages) => &PROGRAMMING_LANGUAGES_PATH,
        Some(SkillCategory::WebDevelopment) => &WEB_DEVELOPMENT_PATH,
        Some(SkillCategory::DataScience) => &DATA_SCIENCE_PATH,
        _ => &DEFAULT_PATH,
    }
}

fn level_index(level: ProficiencyLevel) -> usize {
    match level {
        ProficiencyLevel::Beginner => 0,
        ProficiencyLevel::Intermediate => 1,
        ProficiencyLevel::Advanced => 2,
    }
}

/// Learning path for `skill` at `level`, chosen by the skill's first catalog category.
pub fn learning_path(skill: &str, level: ProficiencyLevel) -> Vec<String> {
    let category = category_of(&skill.trim().to_lowercase());
    table_for(category)[level_index(level)]
        .iter()
        .map(|step| step.to_string())
        .collect()
}
