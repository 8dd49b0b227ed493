pub mod config;
pub mod criteria;
pub mod engine;
pub mod expression;
pub mod lexicon;
pub mod structure;
pub mod validation;

pub use config::*;
pub use criteria::Criterion;
pub use engine::{grade, grade_with, Breakdown, CriterionScore, GradingResult, Rubric};
pub use lexicon::{CompiledLexicon, Lexicon, OrthographyPair};
pub use validation::validate_rubric;
