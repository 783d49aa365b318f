use crate::u32_be;

/// A read position within an immutable byte slice.
///
/// Every pull is checked against the bytes that remain. A failed pull leaves
/// the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ByteCursor<'b> {
  spare: &'b [u8],
}
impl<'b> ByteCursor<'b> {
  #[inline]
  #[must_use]
  pub(crate) const fn new(spare: &'b [u8]) -> Self {
    Self { spare }
  }

  #[inline]
  #[must_use]
  pub(crate) const fn remaining(&self) -> usize {
    self.spare.len()
  }

  #[inline]
  #[must_use]
  pub(crate) const fn is_empty(&self) -> bool {
    self.spare.is_empty()
  }

  #[inline]
  pub(crate) fn try_pull_byte_array<const N: usize>(&mut self) -> Option<[u8; N]> {
    let (head, tail) = self.spare.split_first_chunk::<N>()?;
    self.spare = tail;
    Some(*head)
  }

  #[inline]
  pub(crate) fn try_pull_u32_be(&mut self) -> Option<u32> {
    self.try_pull_byte_array::<4>().map(u32_be)
  }

  #[inline]
  pub(crate) fn try_pull_slice(&mut self, len: usize) -> Option<&'b [u8]> {
    if self.spare.len() >= len {
      let (head, tail) = self.spare.split_at(len);
      self.spare = tail;
      Some(head)
    } else {
      None
    }
  }

  /// Gives up on the rest of the input.
  #[inline]
  pub(crate) fn clear(&mut self) {
    self.spare = &[];
  }
}

#[test]
fn test_byte_cursor_pulls() {
  let bytes = [0, 0, 0, 2, b'a', b'b', 9];
  let mut c = ByteCursor::new(&bytes);
  assert_eq!(c.try_pull_u32_be(), Some(2));
  assert_eq!(c.try_pull_slice(2), Some(&b"ab"[..]));
  assert_eq!(c.remaining(), 1);
  // too long, nothing is consumed
  assert_eq!(c.try_pull_slice(2), None);
  assert_eq!(c.try_pull_byte_array::<4>(), None);
  assert_eq!(c.remaining(), 1);
  assert_eq!(c.try_pull_byte_array::<1>(), Some([9]));
  assert!(c.is_empty());
}
