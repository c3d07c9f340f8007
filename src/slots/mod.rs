//! Conversions between slots, epochs and unix timestamps.
//!
//! All arithmetic saturates instead of wrapping.

pub use self::clock::SlotClock;

mod clock;

/// The first slot of the beacon chain.
pub const GENESIS_SLOT: u64 = 0;

/// Unix timestamp at which `slot` starts.
pub fn compute_timestamp_at_slot(genesis_time: u64, slot: u64, seconds_per_slot: u64) -> u64 {
    let slots_since_genesis = slot.saturating_sub(GENESIS_SLOT);

    genesis_time.saturating_add(slots_since_genesis.saturating_mul(seconds_per_slot))
}

/// Slot enclosing `timestamp`. Timestamps before genesis map to [`GENESIS_SLOT`].
pub fn compute_slot_at_timestamp(genesis_time: u64, timestamp: u64, seconds_per_slot: u64) -> u64 {
    if timestamp < genesis_time || seconds_per_slot == 0 {
        return GENESIS_SLOT;
    }

    GENESIS_SLOT + (timestamp - genesis_time) / seconds_per_slot
}

pub fn compute_epoch_at_slot(slot: u64, slots_per_epoch: u64) -> u64 {
    slot.checked_div(slots_per_epoch).unwrap_or(0)
}

pub fn compute_start_slot_at_epoch(epoch: u64, slots_per_epoch: u64) -> u64 {
    epoch.saturating_mul(slots_per_epoch)
}
