use std::path::Path;

use crate::runtime::domain::stream_info::StreamInfo;
use crate::shared::frame::Frame;

/// Consumes the frames that leave the filter graph.
pub trait FrameSink: Send {
    fn open(
        &mut self,
        path: &Path,
        info: &StreamInfo,
    ) -> Result<(), Box<dyn std::error::Error>>;

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}
