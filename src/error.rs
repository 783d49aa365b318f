use core::fmt;

use crate::png::{ChunkTag, HeaderFault, InflateError, Unsupported};

/// An error from decoding PNG data.
///
/// Every variant is fatal to the decode: there's no partial image on failure.
/// The only anomaly the decoder tolerates is an unknown chunk type, which is
/// logged and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The data doesn't start with the 8-byte PNG signature.
  InvalidFormat,

  /// The data ran out before an `IEND` chunk was found.
  ///
  /// This is also used when there's a partial chunk prefix (length and type)
  /// at the end of the data.
  UnexpectedEof,

  /// A chunk declares more payload than the data actually holds, or the
  /// trailing CRC is cut off.
  TruncatedChunk {
    /// The chunk's type tag.
    tag: ChunkTag,
    /// Payload length plus the 4 CRC bytes, as declared.
    declared: usize,
    /// Bytes that were actually left.
    available: usize,
  },

  /// A chunk appeared somewhere it may not: image data, text, or the end
  /// marker before the header, or a second header.
  OutOfOrderChunk {
    /// The offending chunk's type tag.
    tag: ChunkTag,
  },

  /// The `IHDR` chunk is malformed.
  InvalidHeader(HeaderFault),

  /// The header is legal PNG, but describes an image this decoder won't
  /// produce pixels for.
  Unsupported(Unsupported),

  /// The image would need more memory than the configured limit allows (or
  /// more than `usize` can even express).
  ImageTooLarge {
    /// Bytes the filtered image data would need. Saturates at `usize::MAX`.
    required: usize,
    /// The configured limit.
    limit: usize,
  },

  /// The allocator couldn't give us enough space.
  Alloc,

  /// The inflate backend failed on the compressed image data.
  DecompressionError(InflateError),

  /// The decompressed data isn't exactly `height * (1 + width * bpp)` bytes.
  SizeMismatch {
    /// The size the header calls for.
    expected: usize,
    /// The size that came out of the inflate step. When the data overflows
    /// the output buffer this is the buffer's size, so it's a lower bound.
    actual: usize,
  },

  /// A scanline starts with a filter type byte other than 0 through 4.
  InvalidFilterType {
    /// Zero-based scanline index.
    row: u32,
    /// The filter type byte found.
    value: u8,
  },
}

impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PngError::InvalidFormat => write!(f, "missing or invalid PNG signature"),
      PngError::UnexpectedEof => write!(f, "data ended before the IEND chunk"),
      PngError::TruncatedChunk { tag, declared, available } => {
        write!(f, "{tag} chunk declares {declared} bytes but only {available} remain")
      }
      PngError::OutOfOrderChunk { tag } => write!(f, "{tag} chunk is out of order"),
      PngError::InvalidHeader(fault) => write!(f, "invalid IHDR: {fault}"),
      PngError::Unsupported(what) => write!(f, "unsupported image: {what}"),
      PngError::ImageTooLarge { required, limit } => {
        write!(f, "image needs {required} bytes, limit is {limit}")
      }
      PngError::Alloc => write!(f, "allocation failed"),
      PngError::DecompressionError(e) => write!(f, "decompression failed: {e}"),
      PngError::SizeMismatch { expected, actual } => {
        write!(f, "decompressed {actual} bytes, header requires {expected}")
      }
      PngError::InvalidFilterType { row, value } => {
        write!(f, "invalid filter type {value} on scanline {row}")
      }
    }
  }
}

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
impl std::error::Error for PngError {}

#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<HeaderFault> for PngError {
  #[inline]
  fn from(fault: HeaderFault) -> Self {
    Self::InvalidHeader(fault)
  }
}
impl From<Unsupported> for PngError {
  #[inline]
  fn from(what: Unsupported) -> Self {
    Self::Unsupported(what)
  }
}
impl From<InflateError> for PngError {
  #[inline]
  fn from(e: InflateError) -> Self {
    Self::DecompressionError(e)
  }
}
