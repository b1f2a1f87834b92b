use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssetError, AssetResult};

/// Prefix of the textual payload form, matching a browser data URL.
pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Downsampling and re-encoding parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Images wider than this are scaled down, preserving aspect ratio.
    pub max_width: u32,
    /// JPEG quality factor in `(0, 1]`.
    pub quality: f32,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            max_width: 2500,
            quality: 0.7,
        }
    }
}

/// Re-encodes a raw image into a bounded-size textual payload.
///
/// Output is a JPEG data URL whose size is bounded by the width and quality
/// settings. Deterministic given identical input and parameters.
#[derive(Clone, Debug, Default)]
pub struct AssetCompressor {
    config: CompressorConfig,
}

impl AssetCompressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressorConfig {
        &self.config
    }

    /// Compress raw image bytes into the textual payload form.
    ///
    /// Decoding and encoding are CPU-bound, so the work runs on the blocking
    /// pool and never stalls interaction handling. An unreadable source
    /// signals [`AssetError::Decode`] and produces no output.
    pub async fn compress(&self, raw: Vec<u8>) -> AssetResult<String> {
        let config = self.config;
        tokio::task::spawn_blocking(move || compress_blocking(&raw, &config))
            .await
            .map_err(|e| AssetError::Encode(format!("compression task aborted: {e}")))?
    }
}

fn compress_blocking(raw: &[u8], config: &CompressorConfig) -> AssetResult<String> {
    let img = image::load_from_memory(raw).map_err(|e| AssetError::Decode(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    let img = if width > config.max_width {
        let scaled_height = ((height as u64 * config.max_width as u64) / width as u64).max(1);
        img.resize_exact(config.max_width, scaled_height as u32, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = img.to_rgb8();
    let quality = (config.quality.clamp(0.01, 1.0) * 100.0).round() as u8;
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
        .map_err(|e| AssetError::Encode(e.to_string()))?;

    debug!(
        raw_bytes = raw.len(),
        jpeg_bytes = jpeg.len(),
        width = rgb.width(),
        height = rgb.height(),
        "re-encoded asset image"
    );
    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&jpeg)))
}
