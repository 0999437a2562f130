//! Command-line interface and orchestration for dotnet-outdated
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap, reads the step's
//! action inputs and workflow context from the environment, and performs one pass:
//!
//! 1. Build the typed configuration, failing fast on invalid listing inputs
//! 2. Run `dotnet list package --outdated` and parse its report
//! 3. Render the summary and detailed views
//! 4. Create the check run, then create, update or delete the pull request comment
//!
//! Publishing never fails the run. Anything else that goes wrong is reported to the
//! host as an `::error::` workflow command followed by exit code 1.

mod host;
mod run;

pub use host::Host;
pub use run::{Environment, LogLevel, run, run_in};
