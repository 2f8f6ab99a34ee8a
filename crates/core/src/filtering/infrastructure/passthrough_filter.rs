use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::frame::Frame;

/// Forwards frames untouched. Useful as a placeholder child so face-to-child
/// pairing stays positional while a slot is disabled.
pub struct PassthroughFilter;

impl PassthroughFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassthroughFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFilter for PassthroughFilter {
    fn process(&mut self, _frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_untouched() {
        let mut frame = Frame::filled(4, 4, 3, 77, 0);
        let before = frame.data().to_vec();
        PassthroughFilter::new().process(&mut frame).unwrap();
        assert_eq!(frame.data(), &before[..]);
    }
}
