//! Lock-free value channel between the UI domain and the render domain.
//!
//! The bridge is the sole crossing point between the two concurrency
//! domains: the [`crate::store::ParameterStore`] publishes each committed
//! value through a [`BridgeWriter`], and the render callback reads the
//! latest values through a [`BridgeReader`]. Each parameter owns exactly one
//! atomic slot, so a burst of writes between two render quanta collapses to
//! the last value, which is the correct semantic for control parameters.
//!
//! Both ends are wait-free: `publish` and `read_latest` are a bounded scan
//! over a fixed slot table plus one whole-word atomic access. Nothing here
//! allocates after [`channel`] returns, and no lock is ever held across the
//! domain boundary.
//!
//! Values are stored as `f32` bit patterns in `AtomicU32` cells, so a single
//! address's value is always published and read as a whole; torn reads of
//! one value are impossible. Values of *different* addresses read back to
//! back may come from different commits; that is acceptable by contract.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::snapshot::RenderSnapshot;
use crate::types::{ParamAddress, ParamValue};

/// One parameter's slot: its address and the bits of its latest value.
struct Slot {
    address: ParamAddress,
    bits: AtomicU32,
}

/// Create a connected writer/reader pair over the given parameters.
///
/// Every slot starts out holding the parameter's default, so a render-domain
/// read before the first publish returns the declared default rather than
/// blocking or failing.
///
/// The single-writer/single-reader discipline is enforced by construction:
/// neither handle is cloneable, so exactly one writer and one reader exist.
pub fn channel(seed: &[(ParamAddress, ParamValue)]) -> (BridgeWriter, BridgeReader) {
    let slots: Arc<[Slot]> = seed
        .iter()
        .map(|&(address, default)| Slot {
            address,
            bits: AtomicU32::new(default.to_bits()),
        })
        .collect();
    (
        BridgeWriter {
            slots: Arc::clone(&slots),
        },
        BridgeReader { slots },
    )
}

/// UI-domain end of the bridge.
///
/// Held by the parameter store; `publish` is called on every committed
/// value. Must never be used from the render domain.
pub struct BridgeWriter {
    slots: Arc<[Slot]>,
}

impl BridgeWriter {
    /// Publish a committed value for an address.
    ///
    /// Completes in bounded, allocation-free time and never blocks.
    /// Publishing an address with no slot is a programmer error upstream
    /// (the store validates addresses) and is ignored here.
    pub fn publish(&self, address: ParamAddress, value: ParamValue) {
        if let Some(slot) = self.slots.iter().find(|slot| slot.address == address) {
            slot.bits.store(value.to_bits(), Ordering::Relaxed);
        } else {
            debug_assert!(false, "publish to unknown address {}", address);
        }
    }
}

/// Render-domain end of the bridge.
///
/// The only object the render callback may touch. All operations are
/// wait-free and allocation-free.
pub struct BridgeReader {
    slots: Arc<[Slot]>,
}

impl BridgeReader {
    /// Read the most recently published value for an address.
    ///
    /// Returns the declared default if nothing was published yet, and `0.0`
    /// for an address that was never defined (mirroring a render-side
    /// parameter query for an unknown address).
    pub fn read_latest(&self, address: ParamAddress) -> ParamValue {
        self.slots
            .iter()
            .find(|slot| slot.address == address)
            .map(|slot| f32::from_bits(slot.bits.load(Ordering::Relaxed)))
            .unwrap_or(0.0)
    }

    /// Fill a snapshot with the latest value of every slot.
    ///
    /// Reuses the snapshot's fixed storage; no allocation.
    pub fn read_into(&self, snapshot: &mut RenderSnapshot) {
        snapshot.clear();
        for slot in self.slots.iter() {
            snapshot.push(slot.address, f32::from_bits(slot.bits.load(Ordering::Relaxed)));
        }
    }

    /// Build a fresh snapshot of every slot.
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut snapshot = RenderSnapshot::empty();
        self.read_into(&mut snapshot);
        snapshot
    }

    /// Number of slots in the bridge.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::thread;

    #[test]
    fn test_reads_default_before_first_publish() {
        let (_writer, reader) = channel(&[(1, 2.0)]);
        assert_eq!(reader.read_latest(1), 2.0);
    }

    #[test]
    fn test_read_after_publish_is_exact() {
        let (writer, reader) = channel(&[(0, 1.0), (1, 2.0)]);
        writer.publish(1, 4.0);
        assert_eq!(reader.read_latest(1), 4.0);
        // Other slots untouched
        assert_eq!(reader.read_latest(0), 1.0);
    }

    #[test]
    fn test_unknown_address_reads_zero() {
        let (_writer, reader) = channel(&[(1, 2.0)]);
        assert_eq!(reader.read_latest(42), 0.0);
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let (writer, reader) = channel(&[(1, 2.0)]);
        writer.publish(1, 0.0);
        writer.publish(1, 3.0);
        writer.publish(1, 1.0);
        assert_eq!(reader.read_latest(1), 1.0);
    }

    #[test]
    fn test_snapshot_captures_all_slots() {
        let (writer, reader) = channel(&[(0, 1.0), (1, 2.0)]);
        writer.publish(0, 0.25);
        let snapshot = reader.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.value(0), Some(0.25));
        assert_eq!(snapshot.value(1), Some(2.0));
    }

    #[test]
    fn test_race_never_tears_a_single_value() {
        // A tight writer loop alternating two distinctive bit patterns and a
        // tight reader loop; any mix of the two words would produce a third
        // bit pattern.
        let a: f32 = 123.456;
        let b: f32 = -987.654;
        let (writer, reader) = channel(&[(1, a)]);
        let stop = Arc::new(AtomicBool::new(false));

        let writer_stop = Arc::clone(&stop);
        let writer_thread = thread::spawn(move || {
            let mut flip = false;
            while !writer_stop.load(Ordering::Relaxed) {
                writer.publish(1, if flip { a } else { b });
                flip = !flip;
            }
        });

        for _ in 0..200_000 {
            let bits = reader.read_latest(1).to_bits();
            assert!(
                bits == a.to_bits() || bits == b.to_bits(),
                "torn value observed: {:#010x}",
                bits
            );
        }

        stop.store(true, Ordering::Relaxed);
        writer_thread.join().unwrap();
    }
}
