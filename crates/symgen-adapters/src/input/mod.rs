//! Input source adapters.

mod scripted;

pub use scripted::ScriptedInput;
