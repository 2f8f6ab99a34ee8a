use std::path::Path;

use crate::runtime::domain::stream_info::StreamInfo;
use crate::shared::frame::Frame;

/// Produces the frames a capture session feeds into the filter graph.
///
/// Implementations own the I/O details; the session runner only sees
/// [`Frame`]s and [`StreamInfo`].
pub trait FrameSource: Send {
    /// Opens the source and reports the stream's shape.
    fn open(&mut self, path: &Path) -> Result<StreamInfo, Box<dyn std::error::Error>>;

    /// Iterates frames in presentation order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_>;

    /// Releases any resources held by the source.
    fn close(&mut self);
}
