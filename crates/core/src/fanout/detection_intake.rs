use std::sync::{Arc, Mutex, Weak};

use crate::shared::face_region::FaceRegion;

type Slot = Mutex<Option<Vec<FaceRegion>>>;

/// Creates the single-slot handoff between a detection callback and a
/// fan-out node's dispatch path.
///
/// The slot holds at most one pending region set; a new delivery replaces
/// whatever is waiting, so the dispatch side always observes whole,
/// most-recent snapshots. Neither side blocks beyond the slot swap itself.
///
/// The receiver owns the slot; senders only hold a weak handle. Dropping
/// the receiver (or the node that owns it) tears the handoff down and
/// later deliveries are refused.
pub fn detection_channel() -> (DetectionSender, DetectionReceiver) {
    let slot = Arc::new(Mutex::new(None));
    (
        DetectionSender {
            slot: Arc::downgrade(&slot),
        },
        DetectionReceiver { slot },
    )
}

/// Cloneable handle given to the detection subsystem.
#[derive(Clone)]
pub struct DetectionSender {
    slot: Weak<Slot>,
}

impl DetectionSender {
    /// Delivers one detection cycle's regions (zero or more), replacing any
    /// undrained set. Never blocks.
    ///
    /// Returns `false` when the receiving node has been dropped; the
    /// delivery is refused rather than left dangling.
    pub fn deliver(&self, regions: Vec<FaceRegion>) -> bool {
        let Some(slot) = self.slot.upgrade() else {
            log::debug!("detection delivery refused: receiver is gone");
            return false;
        };
        *lock_slot(&slot) = Some(regions);
        true
    }
}

/// Dispatch-side end of the handoff.
pub struct DetectionReceiver {
    slot: Arc<Slot>,
}

impl DetectionReceiver {
    /// Takes the newest pending region set without blocking, or `None` if
    /// nothing arrived since the last drain.
    pub fn latest(&self) -> Option<Vec<FaceRegion>> {
        lock_slot(&self.slot).take()
    }
}

/// A poisoned slot only means a panic elsewhere while swapping; the data
/// inside is still a whole snapshot, so keep going.
fn lock_slot(slot: &Slot) -> std::sync::MutexGuard<'_, Option<Vec<FaceRegion>>> {
    match slot.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
