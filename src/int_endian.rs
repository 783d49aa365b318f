/// Decodes a big-endian (network byte order) `u32`.
///
/// PNG stores every multi-byte integer this way: chunk lengths, the image
/// width and height, and so on. The result doesn't depend on the endianness of
/// the host.
#[inline]
#[must_use]
pub const fn u32_be(bytes: [u8; 4]) -> u32 {
  u32::from_be_bytes(bytes)
}

#[test]
fn test_u32_be() {
  assert_eq!(u32_be([0, 0, 0, 0]), 0);
  assert_eq!(u32_be([0, 0, 0, 13]), 13);
  assert_eq!(u32_be([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
  assert_eq!(u32_be([0xFF, 0xFF, 0xFF, 0xFF]), u32::MAX);
  // the most significant byte comes first
  assert_eq!(u32_be([1, 0, 0, 0]), 1 << 24);
}
