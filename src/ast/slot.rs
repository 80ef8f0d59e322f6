//! Write-once attachment points on AST nodes

use crate::error::{SemaError, SemaResult};

/// Starts empty, can be filled exactly once, is never cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<T> {
    value: Option<T>,
    what: &'static str,
}

impl<T> Slot<T> {
    /// `what` names the slot in the internal error raised on a second fill
    pub fn empty(what: &'static str) -> Self {
        Self { value: None, what }
    }

    pub fn fill(&mut self, value: T) -> SemaResult<()> {
        if self.value.is_some() {
            return Err(SemaError::SlotAlreadyFilled { what: self.what });
        }
        self.value = Some(value);
        Ok(())
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_filled(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: Copy> Slot<T> {
    pub fn copied(&self) -> Option<T> {
        self.value
    }
}
