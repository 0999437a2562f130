//! dotnet-outdated crate
//!
//! This crate is an implementation detail of the `dotnet-outdated` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.
//!
//! # Module Organization
//!
//! - [`config`]: Action inputs and the typed configuration built from them
//! - [`dotnet`]: Invocation of `dotnet list package --outdated` and its JSON report
//! - [`reports`]: Markdown views of the report and version classification
//! - [`github`]: Run context, REST client, and the idempotent publisher
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod dotnet;

#[doc(hidden)]
pub mod github;

#[doc(hidden)]
pub mod reports;

pub use crate::commands::{Host, run, run_in};
