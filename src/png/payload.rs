use alloc::vec::Vec;

use super::*;
use crate::PngError;

/// Everything the chunk walk collects from a PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngPayload {
  /// The image header.
  pub header: ImageHeader,
  /// All `IDAT` payloads joined in file order. This is one zlib stream.
  pub compressed: Vec<u8>,
  /// One entry per `tEXt` chunk, in file order.
  pub texts: Vec<TextEntry>,
  /// Tags of chunks that were skipped because this decoder doesn't know them.
  pub skipped: Vec<ChunkTag>,
}

/// Walks the whole PNG and collects the header, compressed data, and text.
///
/// * `IHDR` must come before any `IDAT`, `tEXt`, or `IEND`, and only once.
/// * `IDAT` payloads are appended in order, however the encoder split them.
/// * `IEND` ends the walk; anything after it is ignored.
/// * Any other chunk is logged and skipped, even one that appears before the
///   `IHDR`.
///
/// ## Failure
/// * [`PngError::InvalidFormat`] for a bad signature.
/// * [`PngError::TruncatedChunk`] if a chunk runs past the end of the data.
/// * [`PngError::OutOfOrderChunk`] for ordering violations as above.
/// * [`PngError::InvalidHeader`] if the `IHDR` payload is bad.
/// * [`PngError::UnexpectedEof`] if there's no `IEND`.
pub fn collect_payload(bytes: &[u8]) -> Result<PngPayload, PngError> {
  let mut header: Option<ImageHeader> = None;
  let mut compressed: Vec<u8> = Vec::new();
  let mut texts: Vec<TextEntry> = Vec::new();
  let mut skipped: Vec<ChunkTag> = Vec::new();

  for raw_chunk in RawChunkIter::from_png_bytes(bytes)? {
    let RawChunk { tag, payload, .. } = raw_chunk?;
    log::trace!("chunk {tag} ({} bytes)", payload.len());
    match tag {
      ChunkTag::IHDR => {
        if header.is_some() {
          return Err(PngError::OutOfOrderChunk { tag });
        }
        header = Some(ImageHeader::from_ihdr_payload(payload)?);
      }
      ChunkTag::IDAT | ChunkTag::tEXt if header.is_none() => {
        return Err(PngError::OutOfOrderChunk { tag });
      }
      ChunkTag::IDAT => compressed.extend_from_slice(payload),
      ChunkTag::tEXt => texts.push(TextEntry::from(payload)),
      ChunkTag::IEND => {
        let header = header.ok_or(PngError::OutOfOrderChunk { tag })?;
        log::debug!(
          "collected {} compressed bytes and {} text entries, skipped {} chunks",
          compressed.len(),
          texts.len(),
          skipped.len()
        );
        return Ok(PngPayload { header, compressed, texts, skipped });
      }
      other => {
        if other.is_critical() {
          log::warn!("skipping unknown critical chunk {other}");
        } else {
          log::warn!("skipping unknown chunk {other}");
        }
        skipped.push(other);
      }
    }
  }

  Err(PngError::UnexpectedEof)
}
