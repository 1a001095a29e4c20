//! Generator invocation adapters.

mod command;
mod recording;

pub use command::{CommandInvoker, GeneratorCommand, TARGET_ENV};
pub use recording::RecordingInvoker;
