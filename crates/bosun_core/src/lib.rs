//! bosun's job-control engine: per-job dispatch, pipeline launching, the
//! background job registry, and the cooperative reaper.

pub mod builtins;
pub mod context;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod reaper;
pub mod registry;

pub use builtins::shutdown;
pub use context::ShellContext;
pub use error::{ShellError, ShellResult};
pub use executor::{dispatch, Flow};
