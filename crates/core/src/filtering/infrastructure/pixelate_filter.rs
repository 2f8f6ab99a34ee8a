use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::constants::DEFAULT_PIXELATE_BLOCK;
use crate::shared::frame::Frame;

/// Block-average mosaic: every `block`-sized square collapses to its mean
/// color. Partial blocks at the right/bottom edges average over the pixels
/// they actually cover.
pub struct PixelateFilter {
    block: usize,
}

impl PixelateFilter {
    pub fn new(block: usize) -> Self {
        Self {
            block: block.max(1),
        }
    }
}

impl Default for PixelateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELATE_BLOCK)
    }
}

impl FrameFilter for PixelateFilter {
    fn process(&mut self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let channels = frame.channels() as usize;
        let stride = frame.stride();
        let data = frame.data_mut();

        for by in (0..height).step_by(self.block) {
            let bh = self.block.min(height - by);
            for bx in (0..width).step_by(self.block) {
                let bw = self.block.min(width - bx);

                let mut sums = [0u64; 4];
                for row in by..by + bh {
                    for col in bx..bx + bw {
                        let offset = row * stride + col * channels;
                        for (c, sum) in sums.iter_mut().take(channels).enumerate() {
                            *sum += u64::from(data[offset + c]);
                        }
                    }
                }

                let count = (bw * bh) as u64;
                let mut mean = [0u8; 4];
                for c in 0..channels {
                    mean[c] = (sums[c] / count) as u8;
                }

                for row in by..by + bh {
                    for col in bx..bx + bw {
                        let offset = row * stride + col * channels;
                        data[offset..offset + channels].copy_from_slice(&mean[..channels]);
                    }
                }
            }
        }

        Ok(())
    }
}
