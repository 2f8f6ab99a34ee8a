use std::path::PathBuf;

/// Shape of a frame stream, reported by a source when it opens.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    pub total_frames: usize,
    pub source_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_image_is_a_one_frame_stream() {
        let info = StreamInfo {
            width: 800,
            height: 600,
            total_frames: 1,
            source_path: Some(PathBuf::from("/tmp/portrait.png")),
        };
        assert_eq!(info.total_frames, 1);
        assert_eq!(info.clone(), info);
    }
}
