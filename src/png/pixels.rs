use alloc::vec::Vec;

/// Unfiltered image samples, row-major, top row first.
///
/// Each pixel is `bytes_per_pixel` bytes, and 16-bit channels are kept in
/// their big-endian PNG order. There's no padding between rows.
///
/// These only come out of the decoder, you can't build one yourself:
///
/// ```compile_fail
/// let p = minipng::png::PixelBuffer::new(1, 1, 1, vec![0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
  width: u32,
  height: u32,
  bytes_per_pixel: usize,
  data: Vec<u8>,
}
impl PixelBuffer {
  /// Wraps already unfiltered data of exactly
  /// `width * height * bytes_per_pixel` bytes.
  #[must_use]
  pub(crate) fn new(width: u32, height: u32, bytes_per_pixel: usize, data: Vec<u8>) -> Self {
    assert_eq!(data.len(), width as usize * height as usize * bytes_per_pixel);
    Self { width, height, bytes_per_pixel, data }
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// Bytes per pixel.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    self.bytes_per_pixel
  }

  /// Bytes per row.
  #[inline]
  #[must_use]
  pub const fn stride(&self) -> usize {
    self.width as usize * self.bytes_per_pixel
  }

  /// All of the samples.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  /// Gives up the buffer.
  #[inline]
  #[must_use]
  pub fn into_vec(self) -> Vec<u8> {
    self.data
  }

  /// One row of samples.
  ///
  /// ## Panics
  /// * If `y` is out of bounds.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> &[u8] {
    assert!(y < self.height, "row {y} out of bounds (height {})", self.height);
    let stride = self.stride();
    let start = y as usize * stride;
    &self.data[start..start + stride]
  }

  /// Iterates over the rows, top to bottom.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
    self.data.chunks_exact(self.stride())
  }

  /// The samples of one pixel, or `None` if out of bounds.
  #[inline]
  #[must_use]
  pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
    if x >= self.width || y >= self.height {
      return None;
    }
    let start = y as usize * self.stride() + x as usize * self.bytes_per_pixel;
    self.data.get(start..start + self.bytes_per_pixel)
  }

  /// Views 8-bit truecolor data as `[r, g, b]` pixels.
  ///
  /// `None` for any other layout.
  #[inline]
  #[must_use]
  pub fn rgb8(&self) -> Option<&[[u8; 3]]> {
    if self.bytes_per_pixel != 3 {
      return None;
    }
    bytemuck::try_cast_slice::<u8, [u8; 3]>(&self.data).ok()
  }
}
impl AsRef<[u8]> for PixelBuffer {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    &self.data
  }
}

#[test]
fn test_pixel_buffer_access() {
  use alloc::vec;
  let p = PixelBuffer::new(2, 2, 3, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
  assert_eq!(p.stride(), 6);
  assert_eq!(p.row(1), &[7, 8, 9, 10, 11, 12]);
  assert_eq!(p.pixel(1, 0), Some(&[4, 5, 6][..]));
  assert_eq!(p.pixel(2, 0), None);
  assert_eq!(p.pixel(0, 2), None);
  assert_eq!(p.rgb8().unwrap()[3], [10, 11, 12]);
  assert_eq!(p.rows().count(), 2);

  let gray16 = PixelBuffer::new(1, 2, 2, vec![0x01, 0x02, 0x03, 0x04]);
  assert_eq!(gray16.rgb8(), None);
  assert_eq!(gray16.pixel(0, 1), Some(&[0x03, 0x04][..]));
  assert_eq!(gray16.into_vec().len(), 4);
}
