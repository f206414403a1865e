//! 한글 음절 코덱과 치환 테이블

pub mod syllable;
pub mod tables;
pub mod unicode;

pub use syllable::{classify, compose, decompose, SyllableParts};
