use crate::filtering::domain::frame_filter::FrameFilter;
use crate::shared::constants::DEFAULT_PIXELATE_BLOCK;

use super::invert_filter::InvertFilter;
use super::passthrough_filter::PassthroughFilter;
use super::pixelate_filter::PixelateFilter;
use super::tint_filter::TintFilter;

/// Names accepted by [`create_filter`], for CLI help and error messages.
pub const FILTER_NAMES: &[&str] = &["passthrough", "pixelate", "tint", "invert"];

/// Creates a child filter by name.
///
/// `pixelate` accepts an optional block size suffix (`pixelate:8`).
pub fn create_filter(name: &str) -> Result<Box<dyn FrameFilter>, Box<dyn std::error::Error>> {
    let (base, arg) = match name.split_once(':') {
        Some((base, arg)) => (base, Some(arg)),
        None => (name, None),
    };

    let filter: Box<dyn FrameFilter> = match base {
        "passthrough" => Box::new(PassthroughFilter::new()),
        "pixelate" => {
            let block = match arg {
                Some(text) => text
                    .parse::<usize>()
                    .map_err(|_| format!("invalid pixelate block size: {text:?}"))?,
                None => DEFAULT_PIXELATE_BLOCK,
            };
            Box::new(PixelateFilter::new(block))
        }
        "tint" => Box::new(TintFilter::warm()),
        "invert" => Box::new(InvertFilter::new()),
        other => {
            return Err(format!(
                "unknown filter {other:?} (expected one of: {})",
                FILTER_NAMES.join(", ")
            )
            .into())
        }
    };

    log::debug!("created child filter: {name}");
    Ok(filter)
}
