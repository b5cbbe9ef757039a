//! # MCI
//!
//! The outer shell of the MCI conversational pipeline. The decision logic itself is an external
//! collaborator behind the [`Pipeline`] trait; this crate defines what goes in and out of one turn
//! and the entry point that drives it.
//!
//! ## Main modules
//!
//! - [`turn`]: [`TurnRequest`] (session id + text) and [`TurnResponse`] (reply + optional
//!   [`VerifiedOutput`]).
//! - [`pipeline`]: the [`Pipeline`] trait and [`MockPipeline`].
//! - [`entry`]: [`handle_request`] / [`run_turn`], one awaited pipeline call per turn.
//! - [`error`]: [`PipelineError`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use mci::{handle_request, MockPipeline};
//!
//! # async fn demo() -> Result<(), mci::PipelineError> {
//! let pipeline = MockPipeline::with_reply("hi");
//! let reply = handle_request(&pipeline, "s1", "hello").await?;
//! assert_eq!(reply, "hi");
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod pipeline;
pub mod turn;

pub use entry::{handle_request, run_turn};
pub use error::PipelineError;
pub use pipeline::{MockPipeline, Pipeline};
pub use turn::{TurnRequest, TurnResponse};

pub use verified_output::{Answer, Ask, Close, Refusal, VerifiedOutput};
