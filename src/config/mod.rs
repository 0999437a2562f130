//! Action inputs and the typed configuration derived from them

#[expect(clippy::module_inception, reason = "the typed configuration lives next to the inputs it reads")]
mod config;
mod inputs;

pub use config::{CheckRunOptions, CommentOptions, Config, DEFAULT_CHECK_RUN_NAME, FetchOptions};
pub use inputs::{Inputs, InvalidInputError};
