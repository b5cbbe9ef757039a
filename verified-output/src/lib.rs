//! Verified output: the closed set of shapes a pipeline turn ends in.
//!
//! Each record is immutable once built (private fields, read accessors only) and compares
//! structurally. [`VerifiedOutput`] is the sum over the four; a turn yields exactly one.
//! This crate only holds data; deciding which variant to produce belongs to the pipeline.

pub mod output;
pub mod record;

pub use output::VerifiedOutput;
pub use record::{Answer, Ask, Close, Refusal};
