use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::face_region::FaceRegion;
use crate::shared::frame::Frame;

use super::detection_intake::{detection_channel, DetectionReceiver, DetectionSender};
use super::patch::{blit_patch, extract_patch};

/// Face-aware fan-out node for a frame-filter graph.
///
/// The node owns an ordered collection of child filters and a snapshot of
/// the most recent detection delivery. On each frame it pairs face `i` with
/// child `i`, crops the face's patch, runs the child on it, and blits the
/// result back, in insertion order. Faces beyond the registered children
/// are dropped; surplus children idle; zero faces is a pure passthrough.
///
/// Detections arrive through the cloneable [`DetectionSender`] and are
/// drained at dispatch, so the face count is refreshed per detection
/// delivery, not per rendered frame. Both paths are non-blocking.
pub struct MultiFaceFilter {
    children: Vec<Box<dyn FrameFilter>>,
    faces: Vec<FaceRegion>,
    mirror: Arc<AtomicBool>,
    intake: DetectionReceiver,
    sender: DetectionSender,
}

/// Cloneable handle for toggling a node's mirror flag from another thread.
#[derive(Clone)]
pub struct MirrorSwitch(Arc<AtomicBool>);

impl MirrorSwitch {
    pub fn set(&self, mirrored: bool) {
        self.0.store(mirrored, Ordering::Relaxed);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl MultiFaceFilter {
    pub fn new() -> Self {
        let (sender, intake) = detection_channel();
        Self {
            children: Vec::new(),
            faces: Vec::new(),
            mirror: Arc::new(AtomicBool::new(false)),
            intake,
            sender,
        }
    }

    /// Appends a child filter. Order of registration is dispatch order;
    /// duplicates are allowed and there is no upper bound.
    pub fn add_filter(&mut self, child: Box<dyn FrameFilter>) {
        self.children.push(child);
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of faces in the last drained detection delivery.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Handle for the external detection subsystem. Deliveries made after
    /// the node is dropped are refused, not queued.
    pub fn detection_sender(&self) -> DetectionSender {
        self.sender.clone()
    }

    /// Drains pending detection deliveries into the face snapshot.
    /// Called automatically at the start of every `process`.
    pub fn refresh_detections(&mut self) {
        if let Some(regions) = self.intake.latest() {
            self.faces = regions;
        }
    }

    pub fn mirror(&self) -> bool {
        self.mirror.load(Ordering::Relaxed)
    }

    pub fn set_mirror(&self, mirrored: bool) {
        self.mirror.store(mirrored, Ordering::Relaxed);
    }

    /// Shared handle to the mirror flag, readable/writable from any thread.
    pub fn mirror_switch(&self) -> MirrorSwitch {
        MirrorSwitch(Arc::clone(&self.mirror))
    }
}

impl Default for MultiFaceFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFilter for MultiFaceFilter {
    fn process(&mut self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.refresh_detections();

        if self.faces.is_empty() || self.children.is_empty() {
            log::trace!(
                "frame {}: passthrough ({} faces, {} children)",
                frame.index(),
                self.faces.len(),
                self.children.len()
            );
            return Ok(());
        }

        let mirrored = self.mirror.load(Ordering::Relaxed);
        let active = self.faces.len().min(self.children.len());
        if self.faces.len() > self.children.len() {
            log::debug!(
                "frame {}: dropping {} face(s) beyond the {} registered children",
                frame.index(),
                self.faces.len() - self.children.len(),
                self.children.len()
            );
        }

        for i in 0..active {
            let mut region = self.faces[i];
            if mirrored {
                region = region.mirrored(frame.width());
            }
            let region = region.clamped(frame.width(), frame.height());

            let Some(mut patch) = extract_patch(frame, &region) else {
                continue;
            };
            self.children[i].process(&mut patch)?;
            blit_patch(frame, &region, &patch)?;
        }

        Ok(())
    }
}
