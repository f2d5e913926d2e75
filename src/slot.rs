//! Write-once configuration cells.
//!
//! A [`OnceSlot`] is a tiny state machine with two states, unset and set.
//! The only permitted transitions are unset → set, and set → set with a
//! value equal to the current one (a no-op). Anything else is a
//! configuration error. This tolerates redundant static initialization
//! without arbitrating between genuinely conflicting definitions.

use std::sync::RwLock;

use crate::error::{Result, TagcodeError};

/// A cell that can be written once and re-written only with an equal value.
#[derive(Debug)]
pub struct OnceSlot<T> {
    what: &'static str,
    cell: RwLock<Option<T>>,
}

impl<T: Clone + PartialEq> OnceSlot<T> {
    /// Creates an unset slot. `what` names the slot's content in error messages.
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            cell: RwLock::new(None),
        }
    }

    /// Creates a slot already holding `value`.
    pub fn preset(what: &'static str, value: T) -> Self {
        Self {
            what,
            cell: RwLock::new(Some(value)),
        }
    }

    /// Sets the value, or verifies it on a repeated set.
    ///
    /// Returns `true` when this call performed the unset → set transition and
    /// `false` when the slot already held an equal value. A differing value
    /// fails with a configuration error and leaves the slot untouched.
    pub fn set(&self, value: T) -> Result<bool> {
        let mut guard = self.cell.write().map_err(|_| self.poisoned())?;
        match guard.as_ref() {
            None => {
                *guard = Some(value);
                Ok(true)
            }
            Some(existing) if *existing == value => Ok(false),
            Some(_) => Err(TagcodeError::Configuration(format!(
                "{} is already set to a different value",
                self.what
            ))),
        }
    }

    /// Returns a clone of the value, or a configuration error while unset.
    pub fn get(&self) -> Result<T> {
        let guard = self.cell.read().map_err(|_| self.poisoned())?;
        guard.clone().ok_or_else(|| {
            TagcodeError::Configuration(format!("{} is not yet configured", self.what))
        })
    }

    /// Returns true once the slot holds a value.
    pub fn is_set(&self) -> bool {
        self.cell.read().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn poisoned(&self) -> TagcodeError {
        TagcodeError::Internal(format!("{} lock poisoned", self.what))
    }
}
