use crate::shared::frame::Frame;

/// Domain interface for one node in a frame-filter graph: consumes a frame,
/// produces a (possibly transformed) frame.
///
/// Transformation is in-place (`&mut Frame`) to avoid per-frame allocation.
/// Implementations may be stateful (e.g., temporal effects), hence
/// `&mut self`; they must be `Send` so a graph can run off-thread.
pub trait FrameFilter: Send {
    fn process(&mut self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>>;
}
