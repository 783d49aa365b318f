use core::fmt;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use super::{DecodeConfig, ImageHeader};
#[cfg(feature = "alloc")]
use crate::PngError;

/// Why an inflate backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflateError {
  /// The stream holds more data than the output buffer has room for.
  OutputFull,
  /// The stream ended before its final block.
  Truncated,
  /// The zlib Adler-32 checksum didn't match.
  ChecksumMismatch,
  /// Any other failure, with the backend's own status code.
  Corrupt(i32),
}
impl fmt::Display for InflateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::OutputFull => write!(f, "output buffer is full"),
      Self::Truncated => write!(f, "zlib stream is truncated"),
      Self::ChecksumMismatch => write!(f, "adler32 mismatch"),
      Self::Corrupt(code) => write!(f, "corrupt zlib stream (status {code})"),
    }
  }
}

/// A zlib decompressor.
///
/// This is the one outside capability the decoder needs. Given the complete
/// zlib stream (every `IDAT` payload joined together) and an output buffer,
/// fill the buffer from the front and report exactly how many bytes were
/// written. The stream must be decoded all the way to its end; a partial
/// result is an error.
pub trait Inflate {
  /// Inflates `compressed` into `out`, returning the byte count written.
  fn inflate(&mut self, compressed: &[u8], out: &mut [u8]) -> Result<usize, InflateError>;
}

/// [`Inflate`] with `miniz_oxide`.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinizInflater {
  /// Skip the Adler-32 check at the end of the zlib stream.
  pub ignore_adler32: bool,
}
#[cfg(feature = "miniz_oxide")]
impl Inflate for MinizInflater {
  fn inflate(&mut self, compressed: &[u8], out: &mut [u8]) -> Result<usize, InflateError> {
    use miniz_oxide::inflate::TINFLStatus;
    miniz_oxide::inflate::decompress_slice_iter_to_slice(
      out,
      core::iter::once(compressed),
      true,
      self.ignore_adler32,
    )
    .map_err(|status| match status {
      TINFLStatus::HasMoreOutput => InflateError::OutputFull,
      TINFLStatus::NeedsMoreInput | TINFLStatus::FailedCannotMakeProgress => {
        InflateError::Truncated
      }
      TINFLStatus::Adler32Mismatch => InflateError::ChecksumMismatch,
      other => InflateError::Corrupt(other as i32),
    })
  }
}

/// Inflates the joined `IDAT` data into the filtered scanline buffer.
///
/// The output buffer is sized from the header, `height * (1 + width * bpp)`,
/// plus one spare byte so that a stream with extra data shows up as a size
/// mismatch instead of a generic inflate failure.
///
/// ## Failure
/// * [`PngError::Unsupported`] if the header can't be decoded to pixels.
/// * [`PngError::ImageTooLarge`] if the buffer would exceed
///   `config.max_image_bytes` (checked before allocating).
/// * [`PngError::Alloc`] if the buffer can't be allocated.
/// * [`PngError::DecompressionError`] if the backend fails.
/// * [`PngError::SizeMismatch`] unless exactly the expected byte count comes
///   out.
#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub fn decompress_payload<I: Inflate + ?Sized>(
  header: &ImageHeader, compressed: &[u8], config: &DecodeConfig, inflater: &mut I,
) -> Result<Vec<u8>, PngError> {
  let limit = config.max_image_bytes;
  let expected =
    header.filtered_len()?.ok_or(PngError::ImageTooLarge { required: usize::MAX, limit })?;
  if expected > limit {
    return Err(PngError::ImageTooLarge { required: expected, limit });
  }
  let capacity = expected.saturating_add(1);

  let mut filtered: Vec<u8> = Vec::new();
  filtered.try_reserve_exact(capacity)?;
  filtered.resize(capacity, 0);

  let actual = match inflater.inflate(compressed, &mut filtered) {
    Ok(count) => count,
    Err(InflateError::OutputFull) => capacity,
    Err(e) => return Err(e.into()),
  };
  log::debug!("inflated {} bytes into {actual} (expected {expected})", compressed.len());
  if actual != expected {
    return Err(PngError::SizeMismatch { expected, actual });
  }
  filtered.truncate(expected);
  Ok(filtered)
}
