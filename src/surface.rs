use crate::document::DecodedLayer;
use crate::types::{ChannelId, ColorMode, LayerError};

/// Transcodes one layer's planar channel data into an interleaved RGBA buffer
/// of exactly `width * height * 4` bytes, row-major from the top-left corner.
/// Straight copy only: no reordering, gamma, or premultiplication. Layers
/// without an alpha plane come out fully opaque.
pub fn transcode(layer: &DecodedLayer) -> Result<Vec<u8>, LayerError> {
    if layer.color_mode != ColorMode::Rgb {
        return Err(LayerError::UnsupportedColorMode { mode: layer.color_mode });
    }

    let pixel_count = layer.width as usize * layer.height as usize;
    let r = require_plane(layer, ChannelId::Red, pixel_count)?;
    let g = require_plane(layer, ChannelId::Green, pixel_count)?;
    let b = require_plane(layer, ChannelId::Blue, pixel_count)?;

    let mut out = vec![0u8; pixel_count * 4];
    match layer.channel(ChannelId::Alpha) {
        Some(a) => {
            check_plane(layer, ChannelId::Alpha, a, pixel_count)?;
            for p in 0..pixel_count {
                let d = p * 4;
                out[d] = r[p];
                out[d + 1] = g[p];
                out[d + 2] = b[p];
                out[d + 3] = a[p];
            }
        }
        None => {
            for p in 0..pixel_count {
                let d = p * 4;
                out[d] = r[p];
                out[d + 1] = g[p];
                out[d + 2] = b[p];
                out[d + 3] = 0xff;
            }
        }
    }
    Ok(out)
}

fn require_plane<'a>(
    layer: &'a DecodedLayer,
    id: ChannelId,
    pixel_count: usize,
) -> Result<&'a [u8], LayerError> {
    let plane = layer.channel(id).ok_or_else(|| LayerError::MissingChannel {
        layer: layer.name.clone(),
        channel: id,
    })?;
    check_plane(layer, id, plane, pixel_count)?;
    Ok(plane)
}

fn check_plane(
    layer: &DecodedLayer,
    id: ChannelId,
    plane: &[u8],
    pixel_count: usize,
) -> Result<(), LayerError> {
    if plane.len() < pixel_count {
        return Err(LayerError::TruncatedPlane {
            layer: layer.name.clone(),
            channel: id,
            expected: pixel_count,
            actual: plane.len(),
        });
    }
    Ok(())
}
