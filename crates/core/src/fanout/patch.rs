use crate::shared::face_region::FaceRegion;
use crate::shared::frame::Frame;

/// Copies the pixels under an in-bounds region out into a standalone frame.
///
/// The caller is responsible for clamping; returns `None` for an empty
/// region. The patch keeps the source frame's index.
pub fn extract_patch(frame: &Frame, region: &FaceRegion) -> Option<Frame> {
    if region.is_empty() {
        return None;
    }

    let channels = frame.channels() as usize;
    let stride = frame.stride();
    let rx = region.x as usize;
    let ry = region.y as usize;
    let rw = region.width as usize;
    let rh = region.height as usize;

    let mut data = vec![0u8; rw * rh * channels];
    let src = frame.data();
    for row in 0..rh {
        let src_offset = (ry + row) * stride + rx * channels;
        let dst_offset = row * rw * channels;
        data[dst_offset..dst_offset + rw * channels]
            .copy_from_slice(&src[src_offset..src_offset + rw * channels]);
    }

    Some(Frame::new(
        data,
        region.width as u32,
        region.height as u32,
        frame.channels(),
        frame.index(),
    ))
}

/// Writes a processed patch back under its region.
///
/// Fails if the patch no longer matches the region's dimensions (a child
/// filter replaced the frame wholesale instead of transforming in place).
pub fn blit_patch(
    frame: &mut Frame,
    region: &FaceRegion,
    patch: &Frame,
) -> Result<(), Box<dyn std::error::Error>> {
    if patch.width() != region.width as u32
        || patch.height() != region.height as u32
        || patch.channels() != frame.channels()
    {
        return Err(format!(
            "patch {}x{} does not match region {}x{}",
            patch.width(),
            patch.height(),
            region.width,
            region.height
        )
        .into());
    }

    let channels = frame.channels() as usize;
    let stride = frame.stride();
    let rx = region.x as usize;
    let ry = region.y as usize;
    let rw = region.width as usize;
    let rh = region.height as usize;

    let dst = frame.data_mut();
    let src = patch.data();
    for row in 0..rh {
        let dst_offset = (ry + row) * stride + rx * channels;
        let src_offset = row * rw * channels;
        dst[dst_offset..dst_offset + rw * channels]
            .copy_from_slice(&src[src_offset..src_offset + rw * channels]);
    }

    Ok(())
}
