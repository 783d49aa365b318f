use core::fmt::{Debug, Display, Write};

use crate::{ByteCursor, PngError};

/// The first eight bytes of a PNG datastream must match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// The 4-byte type code of a chunk.
///
/// The bytes are meant to be ASCII letters, but nothing enforces that. The
/// `Debug` and `Display` impls just `as` cast each byte to a `char`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTag(pub [u8; 4]);
#[allow(nonstandard_style)]
impl ChunkTag {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Uncompressed Latin-1 text
  pub const tEXt: Self = Self(*b"tEXt");

  /// Ancillary chunks have a lowercase first letter.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0].is_ascii_uppercase()
  }
}
impl Debug for ChunkTag {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('"')?;
    Display::fmt(self, f)?;
    f.write_char('"')
  }
}
impl Display for ChunkTag {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
///
/// The payload borrows from the source bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawChunk<'b> {
  /// The chunk's type.
  pub tag: ChunkTag,
  /// The payload, exactly `declared_length` bytes.
  pub payload: &'b [u8],
  /// The length field from the chunk prefix.
  pub declared_length: u32,
  /// The CRC stored after the payload. It's not checked.
  pub declared_crc: u32,
}
impl Debug for RawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("tag", &self.tag)
      .field("payload", &(&self.payload[..self.payload.len().min(12)], self.payload.len()))
      .field("declared_length", &self.declared_length)
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// Each item is either a complete chunk or the error that stopped the walk.
/// After an error (or once the bytes are used up) the iterator is fused and
/// only returns `None`.
///
/// The iterator knows nothing of chunk ordering, it only does the framing.
/// Ordering is handled by [`collect_payload`](crate::png::collect_payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunkIter<'b> {
  cursor: ByteCursor<'b>,
}
impl<'b> RawChunkIter<'b> {
  /// Checks the signature and then walks the chunks after it.
  ///
  /// ## Failure
  /// * [`PngError::InvalidFormat`] if there's no correct signature.
  #[inline]
  pub fn from_png_bytes(bytes: &'b [u8]) -> Result<Self, PngError> {
    match bytes {
      [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Ok(Self::from_chunk_bytes(rest)),
      _ => Err(PngError::InvalidFormat),
    }
  }

  /// Walks chunks starting right at the given bytes, with no signature.
  #[inline]
  #[must_use]
  pub const fn from_chunk_bytes(bytes: &'b [u8]) -> Self {
    Self { cursor: ByteCursor::new(bytes) }
  }

  fn pull_chunk(&mut self) -> Result<RawChunk<'b>, PngError> {
    let declared_length = self.cursor.try_pull_u32_be().ok_or(PngError::UnexpectedEof)?;
    let tag = self.cursor.try_pull_byte_array::<4>().map(ChunkTag).ok_or(PngError::UnexpectedEof)?;
    // payload and CRC must both fit
    let declared = (declared_length as usize).saturating_add(4);
    let available = self.cursor.remaining();
    if available < declared {
      return Err(PngError::TruncatedChunk { tag, declared, available });
    }
    let payload = self.cursor.try_pull_slice(declared_length as usize).ok_or(PngError::UnexpectedEof)?;
    let declared_crc = self.cursor.try_pull_u32_be().ok_or(PngError::UnexpectedEof)?;
    Ok(RawChunk { tag, payload, declared_length, declared_crc })
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = Result<RawChunk<'b>, PngError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.cursor.is_empty() {
      return None;
    }
    let out = self.pull_chunk();
    if out.is_err() {
      self.cursor.clear();
    }
    Some(out)
  }
}
impl core::iter::FusedIterator for RawChunkIter<'_> {}
