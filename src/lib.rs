pub mod config;
pub mod input;
pub mod output;
pub mod scoring;
pub mod text;

pub use scoring::{grade, grade_with, GradingResult};
