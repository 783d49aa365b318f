use alloc::vec::Vec;

use super::*;
use crate::PngError;

/// Run-time decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeConfig {
  /// Upper bound on the decompressed (filtered) image size, in bytes.
  ///
  /// The header's declared size is checked against this before anything is
  /// allocated, so a hostile header can't make the decoder claim gigabytes.
  pub max_image_bytes: usize,
}
impl DecodeConfig {
  /// 256 MiB
  pub const DEFAULT_MAX_IMAGE_BYTES: usize = 256 * 1024 * 1024;

  /// The default settings.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { max_image_bytes: Self::DEFAULT_MAX_IMAGE_BYTES }
  }

  /// Sets [`max_image_bytes`](Self::max_image_bytes).
  #[inline]
  #[must_use]
  pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
    self.max_image_bytes = max_image_bytes;
    self
  }
}
impl Default for DecodeConfig {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

/// A fully decoded PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPng {
  /// The image header.
  pub header: ImageHeader,
  /// `tEXt` entries in file order.
  pub texts: Vec<TextEntry>,
  /// The unfiltered samples.
  pub pixels: PixelBuffer,
  /// How many scanlines used each filter.
  pub filter_tally: FilterTally,
}

/// Decodes PNG bytes with the default settings and `miniz_oxide`.
///
/// See [`decode_png_with`].
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "alloc", feature = "miniz_oxide"))))]
pub fn decode_png(bytes: &[u8]) -> Result<DecodedPng, PngError> {
  decode_png_with(bytes, &DecodeConfig::default(), &mut MinizInflater::default())
}

/// Decodes PNG bytes: chunk walk, inflate, and unfilter.
///
/// Either the whole image decodes or you get an error. All the intermediate
/// buffers are dropped either way.
///
/// ## Failure
/// * Anything from [`collect_payload`], [`ImageHeader::bytes_per_pixel`],
///   [`decompress_payload`], or [`unfilter_scanlines`].
pub fn decode_png_with<I: Inflate + ?Sized>(
  bytes: &[u8], config: &DecodeConfig, inflater: &mut I,
) -> Result<DecodedPng, PngError> {
  let PngPayload { header, compressed, texts, skipped: _ } = collect_payload(bytes)?;
  let bpp = header.bytes_per_pixel()?;
  let filtered = decompress_payload(&header, &compressed, config, inflater)?;
  drop(compressed);
  let (pixels, filter_tally) = unfilter_to_vec(&filtered, header.width, header.height, bpp)?;
  Ok(DecodedPng { header, texts, pixels, filter_tally })
}
