use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::frame::Frame;

/// Photographic negative: every byte becomes `255 - value`.
pub struct InvertFilter;

impl InvertFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvertFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFilter for InvertFilter {
    fn process(&mut self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        for byte in frame.data_mut() {
            *byte = 255 - *byte;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverts_every_byte() {
        let mut frame = Frame::filled(2, 2, 3, 10, 0);
        InvertFilter::new().process(&mut frame).unwrap();
        assert!(frame.data().iter().all(|&b| b == 245));
    }

    #[test]
    fn test_double_invert_is_identity() {
        let mut frame = Frame::filled(3, 1, 3, 0, 0);
        frame.data_mut()[2] = 201;
        let before = frame.data().to_vec();
        let mut filter = InvertFilter::new();
        filter.process(&mut frame).unwrap();
        filter.process(&mut frame).unwrap();
        assert_eq!(frame.data(), &before[..]);
    }
}
