//! lexdrill-core: Question-bank engine for exam practice.
//!
//! This crate ingests loosely-shaped question records, indexes them by id and
//! by (year, subject, number), samples practice sets and mock exams, renders
//! questions with shuffled choices, grades answers by choice identity and
//! summarizes finished sessions.

pub mod bank;
pub mod config;
pub mod error;
pub mod grader;
pub mod index;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod presenter;
pub mod sampler;
pub mod session;
pub mod stats;
pub mod summary;
pub mod traits;

pub use bank::QuestionBank;
pub use config::LexdrillConfig;
pub use model::{GradeResult, PresentedQuestion, RawQuestion, SelectionMode, SessionOutcome};
