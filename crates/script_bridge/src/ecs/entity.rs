//! Entity identifiers
//!
//! Entities are generational keys into the [`World`](super::World). A key
//! whose slot has been freed and reused by a later entity carries a stale
//! version and no longer resolves.

use slotmap::{Key, KeyData};

slotmap::new_key_type! {
    /// Entity identifier (slot index plus version)
    pub struct EntityId;
}

/// Id reported for the absent entity
pub const NULL_ENTITY_ID: u64 = u64::MAX;

impl EntityId {
    /// Stable 64-bit encoding of this id
    ///
    /// The null key encodes as [`NULL_ENTITY_ID`].
    #[must_use]
    pub fn to_bits(self) -> u64 {
        if self.is_null() {
            NULL_ENTITY_ID
        } else {
            self.data().as_ffi()
        }
    }

    /// Rebuild an id from [`EntityId::to_bits`]
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        if bits == NULL_ENTITY_ID {
            Self::null()
        } else {
            KeyData::from_ffi(bits).into()
        }
    }
}
