// Resume side of the pipeline: keyword catalog, text extraction, skill matching
// and education/experience sections. Everything here is pure except the handler.

pub mod catalog;
pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod sections;
