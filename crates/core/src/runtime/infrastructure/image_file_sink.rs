use std::path::{Path, PathBuf};

use crate::runtime::domain::frame_sink::FrameSink;
use crate::runtime::domain::stream_info::StreamInfo;
use crate::shared::frame::Frame;

/// Writes a one-frame stream to an image file with the `image` crate.
///
/// The file is encoded on `write`; `close` verifies a frame was written.
pub struct ImageFileSink {
    path: Option<PathBuf>,
    wrote: bool,
}

impl ImageFileSink {
    pub fn new() -> Self {
        Self {
            path: None,
            wrote: false,
        }
    }
}

impl Default for ImageFileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for ImageFileSink {
    fn open(
        &mut self,
        path: &Path,
        _info: &StreamInfo,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.path = Some(path.to_path_buf());
        self.wrote = false;
        Ok(())
    }

    fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.path.as_ref().ok_or("sink not opened")?;
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("frame data does not match its dimensions")?;
        img.save(path)?;
        self.wrote = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if self.path.take().is_some() && !self.wrote {
            return Err("image sink closed without writing a frame".into());
        }
        Ok(())
    }
}
