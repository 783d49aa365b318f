use alloc::vec::Vec;

/// Textual data from one `tEXt` chunk.
///
/// The bytes are kept exactly as stored: a keyword, a single null byte, and
/// then the text, both nominally Latin-1. Nothing is validated, so an entry
/// with no null byte at all is still kept (it just has no text part).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextEntry {
  data: Vec<u8>,
}
impl TextEntry {
  /// The full raw payload.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.data
  }

  /// The bytes before the first null byte (or all of them if there's none).
  ///
  /// Normally the keyword length should be 1-79 bytes.
  #[inline]
  #[must_use]
  pub fn keyword(&self) -> &[u8] {
    self.data.split(|u| *u == 0).next().unwrap_or(&[])
  }

  /// The bytes after the first null byte, if there is one.
  #[inline]
  #[must_use]
  pub fn text(&self) -> Option<&[u8]> {
    let mut it = self.data.splitn(2, |u| *u == 0);
    it.next();
    it.next()
  }
}
impl From<&[u8]> for TextEntry {
  #[inline]
  fn from(payload: &[u8]) -> Self {
    Self { data: payload.to_vec() }
  }
}
/// Bytes are shown as Latin-1, with the null separator as a space.
impl core::fmt::Display for TextEntry {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    use core::fmt::Write;
    for ch in self.data.iter().copied().map(|u| if u == 0 { ' ' } else { u as char }) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

#[test]
fn test_text_entry_split() {
  let t = TextEntry::from(&b"Title\0A small \0 image"[..]);
  assert_eq!(t.keyword(), b"Title");
  assert_eq!(t.text(), Some(&b"A small \0 image"[..]));
  assert_eq!(t.as_bytes().len(), 21);

  let bare = TextEntry::from(&b"NoSeparator"[..]);
  assert_eq!(bare.keyword(), b"NoSeparator");
  assert_eq!(bare.text(), None);

  let empty = TextEntry::from(&b""[..]);
  assert_eq!(empty.keyword(), b"");
  assert_eq!(empty.text(), None);
}

#[test]
fn test_text_entry_display() {
  let t = TextEntry::from(&b"Author\0caf\xe9"[..]);
  assert_eq!(std::format!("{t}"), "Author caf\u{e9}");
}
