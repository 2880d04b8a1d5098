#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod quiz;
pub mod result;
pub mod topic;

pub use quiz::{normalize, Question, QuestionId, RawQuestion, OPTION_COUNT};
pub use result::{AnswerMap, Completion, Grade, ResultSummary, Submission};
pub use topic::Topic;
