//! Registry of well-known, single-owner slots.
//!
//! Some services (a bullet pool, a global spawn catalog) must have exactly one
//! authoritative instance per scene.  Instead of a process-wide static, the
//! instance claims a key in this registry, which is owned by the scene's
//! [`CellTable`][crate::CellTable] and passed around explicitly.  A second
//! claim on the same key is rejected and the claimant is expected to stay
//! inert.

use crate::{CellError, CellResult, NameMap};

/// Maps well-known keys to the cell slot of their current owner.
#[derive(Default, Debug)]
pub struct SingletonRegistry {
    claims: NameMap<&'static str, u32>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `slot` as the owner of `key`.
    pub fn claim(&mut self, key: &'static str, slot: u32) -> CellResult<()> {
        if self.claims.contains_key(key) {
            return Err(CellError::DuplicateSingleton(key));
        }
        self.claims.insert(key, slot);
        Ok(())
    }

    /// Free `key`, returning the slot that held it.
    pub fn release(&mut self, key: &str) -> Option<u32> {
        self.claims.remove(key)
    }

    pub fn slot(&self, key: &str) -> Option<u32> {
        self.claims.get(key).copied()
    }

    #[inline]
    pub fn is_claimed(&self, key: &str) -> bool {
        self.claims.contains_key(key)
    }

    /// Number of keys currently claimed.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
