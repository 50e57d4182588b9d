pub mod grading;
pub mod heuristic_mcq;
pub mod quiz_builder;
pub mod sentences;
pub mod structured_parser;
pub mod true_false;
pub mod ultra_fallback;
pub mod vocabulary;
