//! In-memory invoker for testing.

use std::sync::{Arc, Mutex};

use symgen_core::{
    application::ports::GeneratorInvoker,
    domain::DispatchDecision,
    error::{SymgenError, SymgenResult},
};

/// Records every decision it receives. Cloning shares the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvoker {
    decisions: Arc<Mutex<Vec<DispatchDecision>>>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> Vec<DispatchDecision> {
        self.decisions
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<DispatchDecision> {
        self.decisions().pop()
    }
}

impl GeneratorInvoker for RecordingInvoker {
    fn invoke(&self, decision: &DispatchDecision) -> SymgenResult<()> {
        self.decisions
            .lock()
            .map_err(|_| SymgenError::Internal {
                message: "recording lock poisoned".into(),
            })?
            .push(decision.clone());
        Ok(())
    }
}
