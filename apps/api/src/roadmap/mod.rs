// Roadmap generation: per-skill learning path, resources, practice and books.

pub mod books;
pub mod handlers;
pub mod learning_path;
pub mod practice;
pub mod ranking;
pub mod resolver;
pub mod resources;
