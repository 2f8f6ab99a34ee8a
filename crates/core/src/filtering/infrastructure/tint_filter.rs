use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::frame::Frame;

/// Scales each channel by a fixed factor, saturating at 255.
///
/// Factors are clamped to `[0.0, 4.0]`.
pub struct TintFilter {
    factors: [f32; 3],
}

impl TintFilter {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        let clamp = |f: f32| f.clamp(0.0, 4.0);
        Self {
            factors: [clamp(r), clamp(g), clamp(b)],
        }
    }

    /// Warm preset used by the CLI's `tint` filter name.
    pub fn warm() -> Self {
        Self::new(1.2, 1.0, 0.8)
    }
}

impl FrameFilter for TintFilter {
    fn process(&mut self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        let channels = frame.channels() as usize;
        for pixel in frame.data_mut().chunks_exact_mut(channels) {
            for c in 0..channels.min(3) {
                pixel[c] = (f32::from(pixel[c]) * self.factors[c]).min(255.0) as u8;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_factors_leave_frame_unchanged() {
        let mut frame = Frame::filled(2, 2, 3, 123, 0);
        TintFilter::new(1.0, 1.0, 1.0).process(&mut frame).unwrap();
        assert!(frame.data().iter().all(|&b| b == 123));
    }

    #[test]
    fn test_scaling_applies_per_channel() {
        let mut frame = Frame::filled(1, 1, 3, 100, 0);
        TintFilter::new(0.5, 1.0, 2.0).process(&mut frame).unwrap();
        assert_eq!(frame.data(), &[50, 100, 200]);
    }

    #[test]
    fn test_saturates_at_255() {
        let mut frame = Frame::filled(1, 1, 3, 200, 0);
        TintFilter::new(2.0, 2.0, 2.0).process(&mut frame).unwrap();
        assert_eq!(frame.data(), &[255, 255, 255]);
    }

    #[test]
    fn test_factors_are_clamped() {
        let mut frame = Frame::filled(1, 1, 3, 10, 0);
        TintFilter::new(-1.0, 100.0, 1.0).process(&mut frame).unwrap();
        // -1.0 clamps to 0.0, 100.0 clamps to 4.0.
        assert_eq!(frame.data(), &[0, 40, 10]);
    }

    #[test]
    fn test_warm_preset_shifts_red_up_blue_down() {
        let mut frame = Frame::filled(1, 1, 3, 100, 0);
        TintFilter::warm().process(&mut frame).unwrap();
        let data = frame.data();
        assert!(data[0] > 100);
        assert_eq!(data[1], 100);
        assert!(data[2] < 100);
    }
}
