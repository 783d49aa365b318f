use core::fmt;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use super::PixelBuffer;
use crate::PngError;

/// The per-scanline filter types of PNG filter method 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// `x`
  None = 0,
  /// `x + a`
  Sub = 1,
  /// `x + b`
  Up = 2,
  /// `x + floor((a + b) / 2)`
  Average = 3,
  /// `x + paeth_predictor(a, b, c)`
  Paeth = 4,
}
impl FilterType {
  /// All filter types in tag order.
  pub const ALL: [Self; 5] = [Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth];
}
impl TryFrom<u8> for FilterType {
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// Picks whichever of `left` (a), `up` (b), or `upper_left` (c) is closest to
/// `a + b - c`.
///
/// Ties go to `left`, then `up`.
#[inline]
#[must_use]
pub const fn paeth_predictor(left: u8, up: u8, upper_left: u8) -> u8 {
  let a_ = left as i32;
  let b_ = up as i32;
  let c_ = upper_left as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests is part of the format, don't touch it.
  if pa <= pb && pa <= pc {
    left
  } else if pb <= pc {
    up
  } else {
    upper_left
  }
}

/// How many scanlines used each filter type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterTally([usize; 5]);
impl FilterTally {
  /// Rows that used the given filter.
  #[inline]
  #[must_use]
  pub const fn count(&self, filter: FilterType) -> usize {
    self.0[filter as usize]
  }

  /// Total rows counted.
  #[inline]
  #[must_use]
  pub fn total(&self) -> usize {
    self.0.iter().sum()
  }

  #[inline]
  fn record(&mut self, filter: FilterType) {
    self.0[filter as usize] += 1;
  }
}
impl fmt::Display for FilterTally {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, count) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{:?}: {count}", FilterType::ALL[i])?;
    }
    Ok(())
  }
}

/// Reverses one scanline's filter.
///
/// `line` is the filtered samples (no tag byte), `prev` the already
/// reconstructed line above (`None` for the first row, which acts as all
/// zeroes), and `out` gets the reconstructed samples. Everything is
/// `bpp`-byte pixels, with `bpp > 0` and all lengths equal.
fn unfilter_line(filter: FilterType, bpp: usize, line: &[u8], prev: Option<&[u8]>, out: &mut [u8]) {
  out.copy_from_slice(line);
  let mut p_it = out.chunks_exact_mut(bpp);
  match (filter, prev) {
    (FilterType::None, _) | (FilterType::Up, None) => (),
    (FilterType::Sub, _) | (FilterType::Paeth, None) => {
      // with no line above, paeth_predictor(a, 0, 0) is always `a`.
      let Some(mut a_pixel) = p_it.next() else { return };
      for pixel in p_it {
        a_pixel.iter().copied().zip(pixel.iter_mut()).for_each(|(a, p)| *p = p.wrapping_add(a));
        a_pixel = pixel;
      }
    }
    (FilterType::Up, Some(b_line)) => {
      for (pixel, b_pixel) in p_it.zip(b_line.chunks_exact(bpp)) {
        b_pixel.iter().copied().zip(pixel.iter_mut()).for_each(|(b, p)| *p = p.wrapping_add(b));
      }
    }
    (FilterType::Average, None) => {
      // the `b` is always 0, so we elide it from the computation
      let Some(mut a_pixel) = p_it.next() else { return };
      for pixel in p_it {
        a_pixel.iter().copied().zip(pixel.iter_mut()).for_each(|(a, p)| *p = p.wrapping_add(a / 2));
        a_pixel = pixel;
      }
    }
    (FilterType::Average, Some(b_line)) => {
      let mut pb_it = p_it.zip(b_line.chunks_exact(bpp));
      let Some((pixel, b_pixel)) = pb_it.next() else { return };
      pixel.iter_mut().zip(b_pixel.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b / 2));
      let mut a_pixel: &[u8] = pixel;
      for (pixel, b_pixel) in pb_it {
        a_pixel.iter().copied().zip(b_pixel.iter().copied()).zip(pixel.iter_mut()).for_each(
          |((a, b), p)| {
            *p = p.wrapping_add(((a as u16 + b as u16) / 2) as u8);
          },
        );
        a_pixel = pixel;
      }
    }
    (FilterType::Paeth, Some(b_line)) => {
      let mut pb_it = p_it.zip(b_line.chunks_exact(bpp));
      let Some((pixel, b_pixel)) = pb_it.next() else { return };
      // first pixel: `a` and `c` are 0, so the prediction is just `b`
      pixel.iter_mut().zip(b_pixel.iter().copied()).for_each(|(p, b)| {
        *p = p.wrapping_add(paeth_predictor(0, b, 0));
      });
      let mut a_pixel: &[u8] = pixel;
      let mut c_pixel = b_pixel;
      for (pixel, b_pixel) in pb_it {
        a_pixel
          .iter()
          .copied()
          .zip(b_pixel.iter().copied())
          .zip(c_pixel.iter().copied())
          .zip(pixel.iter_mut())
          .for_each(|(((a, b), c), p)| {
            *p = p.wrapping_add(paeth_predictor(a, b, c));
          });
        a_pixel = pixel;
        c_pixel = b_pixel;
      }
    }
  }
}

/// Reconstructs the pixels of a filtered image into `out`.
///
/// * `filtered` is `height` scanlines, each a filter type byte followed by
///   `width * bytes_per_pixel` filtered samples.
/// * `out` gets `height` rows of `width * bytes_per_pixel` samples, with the
///   filter bytes dropped.
///
/// Rows are done strictly top to bottom because every row after the first
/// can depend on the finished row above it.
///
/// ## Failure
/// * [`PngError::SizeMismatch`] if `filtered` isn't exactly
///   `height * (1 + width * bytes_per_pixel)` bytes or `out` isn't exactly
///   `height * width * bytes_per_pixel` bytes. These are checked up front,
///   before anything is written.
/// * [`PngError::InvalidFilterType`] at the first row with a bad filter
///   byte. Rows above it will already have been written to `out`.
///
/// ## Panics
/// * If `bytes_per_pixel` is 0.
pub fn unfilter_scanlines(
  filtered: &[u8], width: u32, height: u32, bytes_per_pixel: usize, out: &mut [u8],
) -> Result<FilterTally, PngError> {
  assert!(bytes_per_pixel > 0, "bytes_per_pixel must be non-zero");
  let row_len = (width as usize).saturating_mul(bytes_per_pixel);
  let line_len = row_len.saturating_add(1);
  let expected_filtered = line_len.saturating_mul(height as usize);
  if filtered.len() != expected_filtered {
    return Err(PngError::SizeMismatch { expected: expected_filtered, actual: filtered.len() });
  }
  let expected_out = row_len.saturating_mul(height as usize);
  if out.len() != expected_out {
    return Err(PngError::SizeMismatch { expected: expected_out, actual: out.len() });
  }

  let mut tally = FilterTally::default();
  if row_len == 0 {
    // every scanline is only its filter type byte
    for (y, &tag) in filtered.iter().enumerate() {
      let filter = FilterType::try_from(tag)
        .map_err(|value| PngError::InvalidFilterType { row: y as u32, value })?;
      tally.record(filter);
    }
    return Ok(tally);
  }
  let mut prev: Option<&[u8]> = None;
  for (y, (filterline, out_row)) in
    filtered.chunks_exact(line_len).zip(out.chunks_exact_mut(row_len)).enumerate()
  {
    let (&tag, line) = filterline.split_first().ok_or(PngError::UnexpectedEof)?;
    let filter = FilterType::try_from(tag)
      .map_err(|value| PngError::InvalidFilterType { row: y as u32, value })?;
    unfilter_line(filter, bytes_per_pixel, line, prev, out_row);
    tally.record(filter);
    let out_row: &[u8] = out_row;
    prev = Some(out_row);
  }
  log::debug!("unfiltered {height} rows: {tally}");
  Ok(tally)
}

/// Like [`unfilter_scanlines`], but allocates and returns the pixel buffer.
///
/// ## Failure
/// * As [`unfilter_scanlines`]. The partly written buffer is dropped on
///   error, so there's never a partial image.
/// * [`PngError::Alloc`] if the output can't be allocated.
#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub fn unfilter_to_vec(
  filtered: &[u8], width: u32, height: u32, bytes_per_pixel: usize,
) -> Result<(PixelBuffer, FilterTally), PngError> {
  let len = (width as usize).saturating_mul(bytes_per_pixel).saturating_mul(height as usize);
  let mut data: Vec<u8> = Vec::new();
  data.try_reserve_exact(len)?;
  data.resize(len, 0);
  let tally = unfilter_scanlines(filtered, width, height, bytes_per_pixel, &mut data)?;
  Ok((PixelBuffer::new(width, height, bytes_per_pixel, data), tally))
}
