use core::fmt;

use crate::{u32_be, PngError};

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl ColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// Name of the color type as the PNG standard writes it.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Y => "Grayscale",
      Self::RGB => "Truecolor",
      Self::Index => "Indexed-color",
      Self::YA => "Grayscale with Alpha",
      Self::RGBA => "Truecolor with Alpha",
    }
  }

  /// Bit depths the standard allows for this color type.
  #[must_use]
  pub const fn allowed_bit_depths(self) -> &'static [u8] {
    match self {
      Self::Y => &[1, 2, 4, 8, 16],
      Self::Index => &[1, 2, 4, 8],
      Self::RGB | Self::YA | Self::RGBA => &[8, 16],
    }
  }
}
impl TryFrom<u8> for ColorType {
  type Error = HeaderFault;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => ColorType::Y,
      2 => ColorType::RGB,
      3 => ColorType::Index,
      4 => ColorType::YA,
      6 => ColorType::RGBA,
      other => return Err(HeaderFault::ColorType(other)),
    })
  }
}

/// What's structurally wrong with an `IHDR` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFault {
  /// The payload isn't 13 bytes.
  PayloadLength(usize),
  /// Width is 0.
  ZeroWidth,
  /// Height is 0.
  ZeroHeight,
  /// The color type isn't 0, 2, 3, 4, or 6.
  ColorType(u8),
  /// The bit depth isn't allowed for the color type.
  BitDepth {
    /// The declared color type.
    color_type: ColorType,
    /// The declared bit depth.
    bit_depth: u8,
  },
  /// Compression method other than 0 (zlib).
  CompressionMethod(u8),
  /// Filter method other than 0 (adaptive).
  FilterMethod(u8),
  /// Interlace method other than 0 or 1.
  InterlaceMethod(u8),
}
impl fmt::Display for HeaderFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::PayloadLength(len) => write!(f, "payload is {len} bytes, must be 13"),
      Self::ZeroWidth => write!(f, "width is 0"),
      Self::ZeroHeight => write!(f, "height is 0"),
      Self::ColorType(c) => write!(f, "unknown color type {c}"),
      Self::BitDepth { color_type, bit_depth } => {
        write!(f, "bit depth {bit_depth} is illegal for {}", color_type.name())
      }
      Self::CompressionMethod(m) => write!(f, "unknown compression method {m}"),
      Self::FilterMethod(m) => write!(f, "unknown filter method {m}"),
      Self::InterlaceMethod(m) => write!(f, "unknown interlace method {m}"),
    }
  }
}

/// A legal header that this decoder still won't produce pixels for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
  /// Indexed and alpha color types.
  ColorType(ColorType),
  /// Bit depths of 1, 2, and 4 pack several pixels per byte.
  SubByteDepth(u8),
  /// Adam7 interlacing.
  Interlaced,
}
impl fmt::Display for Unsupported {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::ColorType(c) => write!(f, "{} images", c.name()),
      Self::SubByteDepth(d) => write!(f, "bit depth {d}"),
      Self::Interlaced => write!(f, "Adam7 interlacing"),
    }
  }
}

/// Image Header
///
/// Built once from the `IHDR` chunk and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHeader {
  /// width in pixels, never 0
  pub width: u32,
  /// height in pixels, never 0
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: ColorType,
  /// always 0
  pub compression_method: u8,
  /// always 0
  pub filter_method: u8,
  /// 0 for none, 1 for Adam7
  pub interlace_method: u8,
}
impl ImageHeader {
  /// Decodes the 13-byte payload of an `IHDR` chunk.
  ///
  /// Layout: width (4 bytes BE), height (4 bytes BE), then bit depth, color
  /// type, compression method, filter method, interlace method (1 byte each).
  ///
  /// ## Failure
  /// * [`PngError::InvalidHeader`] for any structural problem. Headers that
  ///   are legal but unsupported still decode fine here, see
  ///   [`bytes_per_pixel`](Self::bytes_per_pixel).
  pub fn from_ihdr_payload(payload: &[u8]) -> Result<Self, PngError> {
    let [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] =
      *payload
    else {
      return Err(HeaderFault::PayloadLength(payload.len()).into());
    };
    let width = u32_be([w0, w1, w2, w3]);
    let height = u32_be([h0, h1, h2, h3]);
    if width == 0 {
      return Err(HeaderFault::ZeroWidth.into());
    }
    if height == 0 {
      return Err(HeaderFault::ZeroHeight.into());
    }
    let color_type = ColorType::try_from(color_type)?;
    if !color_type.allowed_bit_depths().contains(&bit_depth) {
      return Err(HeaderFault::BitDepth { color_type, bit_depth }.into());
    }
    if compression_method != 0 {
      return Err(HeaderFault::CompressionMethod(compression_method).into());
    }
    if filter_method != 0 {
      return Err(HeaderFault::FilterMethod(filter_method).into());
    }
    if interlace_method > 1 {
      return Err(HeaderFault::InterlaceMethod(interlace_method).into());
    }
    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      interlace_method,
    })
  }

  /// If the image data is stored interlaced.
  #[inline]
  #[must_use]
  pub const fn is_interlaced(&self) -> bool {
    self.interlace_method == 1
  }

  /// Name of the interlace method.
  #[must_use]
  pub const fn interlace_name(&self) -> &'static str {
    match self.interlace_method {
      0 => "No interlace",
      1 => "Adam7 interlace",
      _ => "Unknown interlace method",
    }
  }

  /// Bytes per whole pixel: `(bit_depth / 8) * channels`.
  ///
  /// This is also the distance back to the "left" byte during unfiltering.
  ///
  /// ## Failure
  /// * [`PngError::Unsupported`] unless the image is non-interlaced
  ///   grayscale or truecolor at 8 or 16 bits per channel.
  pub fn bytes_per_pixel(&self) -> Result<usize, PngError> {
    match self.color_type {
      ColorType::Y | ColorType::RGB => (),
      other => return Err(Unsupported::ColorType(other).into()),
    }
    if self.bit_depth < 8 {
      return Err(Unsupported::SubByteDepth(self.bit_depth).into());
    }
    if self.is_interlaced() {
      return Err(Unsupported::Interlaced.into());
    }
    Ok((self.bit_depth as usize / 8) * self.color_type.channel_count())
  }

  /// Bytes in one filtered scanline: the filter type byte plus the samples.
  ///
  /// `None` on overflow.
  #[inline]
  pub fn scanline_len(&self) -> Result<Option<usize>, PngError> {
    let bpp = self.bytes_per_pixel()?;
    Ok((self.width as usize).checked_mul(bpp).and_then(|row| row.checked_add(1)))
  }

  /// Bytes of decompressed (still filtered) data the image should have:
  /// `height * (1 + width * bytes_per_pixel)`.
  ///
  /// `None` on overflow.
  #[inline]
  pub fn filtered_len(&self) -> Result<Option<usize>, PngError> {
    Ok(self.scanline_len()?.and_then(|line| line.checked_mul(self.height as usize)))
  }

  /// Bytes of final pixel data: `height * width * bytes_per_pixel`.
  ///
  /// `None` on overflow.
  #[inline]
  pub fn pixel_len(&self) -> Result<Option<usize>, PngError> {
    let bpp = self.bytes_per_pixel()?;
    Ok((self.width as usize).checked_mul(bpp).and_then(|row| row.checked_mul(self.height as usize)))
  }
}
