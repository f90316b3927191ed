//! The show registry: ordered slots for currently running shows.
//!
//! Each slot pairs a stable, profile-defined reference with an optional
//! [`ShowHandle`]; the handle is present exactly while the show is
//! running. Slots are appended in start order and left in place (handle
//! cleared) when their show terminates, so a reference can be restarted
//! into the same conceptual slot.
//!
//! ## Rules
//! - Insertion order is significant only for display/broadcast order.
//! - A reference holds at most one live instance at a time.
//! - The registry is mutated only by the supervisor, on the player's
//!   loop; completion reports arrive over a channel, so nothing ever
//!   mutates it mid-iteration.

use std::sync::Arc;

use crate::error::PlayerError;
use crate::shows::ShowHandle;

/// One registry slot.
#[derive(Debug)]
struct Slot {
    reference: Arc<str>,
    handle: Option<ShowHandle>,
}

/// Ordered collection of show slots.
#[derive(Debug, Default)]
pub(crate) struct ShowRegistry {
    slots: Vec<Slot>,
}

impl ShowRegistry {
    /// Empties the registry (supervisor init).
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// True if `reference` currently holds a live instance.
    pub fn is_live(&self, reference: &str) -> bool {
        self.slots
            .iter()
            .any(|s| &*s.reference == reference && s.handle.is_some())
    }

    /// Installs a live instance for `reference`: refills the existing slot
    /// after a termination, or appends a new one. Fails if the reference
    /// already holds a live instance.
    pub fn insert(&mut self, reference: Arc<str>, handle: ShowHandle) -> Result<(), PlayerError> {
        match self.slots.iter_mut().find(|s| s.reference == reference) {
            Some(slot) if slot.handle.is_some() => Err(PlayerError::ShowAlreadyRunning {
                reference: reference.to_string(),
            }),
            Some(slot) => {
                slot.handle = Some(handle);
                Ok(())
            }
            None => {
                self.slots.push(Slot {
                    reference,
                    handle: Some(handle),
                });
                Ok(())
            }
        }
    }

    /// Clears the instance of `reference`, keeping the slot for restart.
    /// Returns false if there was no live instance.
    pub fn clear_instance(&mut self, reference: &str) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|s| &*s.reference == reference && s.handle.is_some())
        {
            Some(slot) => {
                slot.handle = None;
                true
            }
            None => false,
        }
    }

    /// Iterates live slots in insertion order.
    pub fn live(&self) -> impl Iterator<Item = (&Arc<str>, &ShowHandle)> {
        self.slots
            .iter()
            .filter_map(|s| s.handle.as_ref().map(|h| (&s.reference, h)))
    }

    /// Number of live instances (the termination tally).
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.handle.is_some()).count()
    }
}
