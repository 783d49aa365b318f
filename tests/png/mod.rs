use minipng::{png::*, PngError};
use walkdir::WalkDir;

/// Applies the forward PNG filter to one row.
///
/// `prev` is the unfiltered row above, or all zeroes for the top row.
fn filter_row(filter: FilterType, bpp: usize, row: &[u8], prev: &[u8], out: &mut Vec<u8>) {
  out.push(filter as u8);
  for i in 0..row.len() {
    let a = if i >= bpp { row[i - bpp] } else { 0 };
    let b = prev[i];
    let c = if i >= bpp { prev[i - bpp] } else { 0 };
    let predicted = match filter {
      FilterType::None => 0,
      FilterType::Sub => a,
      FilterType::Up => b,
      FilterType::Average => ((a as u16 + b as u16) / 2) as u8,
      FilterType::Paeth => paeth_predictor(a, b, c),
    };
    out.push(row[i].wrapping_sub(predicted));
  }
}

fn filter_image(pixels: &[u8], width: usize, bpp: usize, filters: &[FilterType]) -> Vec<u8> {
  let stride = width * bpp;
  let zero_row = vec![0; stride];
  let mut out = Vec::new();
  let mut prev: &[u8] = &zero_row;
  for (y, row) in pixels.chunks_exact(stride).enumerate() {
    filter_row(filters[y % filters.len()], bpp, row, prev, &mut out);
    prev = row;
  }
  out
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
  out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
  out.extend_from_slice(tag);
  out.extend_from_slice(payload);
  out.extend_from_slice(&[0; 4]);
}

fn ihdr_payload(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&width.to_be_bytes());
  ihdr.extend_from_slice(&height.to_be_bytes());
  ihdr.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
  ihdr
}

/// Builds a PNG around already compressed data, splitting it over a few
/// `IDAT` chunks.
fn build_png(ihdr: &[u8], zlib: &[u8], texts: &[&[u8]]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  push_chunk(&mut out, b"IHDR", ihdr);
  for text in texts {
    push_chunk(&mut out, b"tEXt", text);
  }
  let third = zlib.len() / 3;
  let (first, rest) = zlib.split_at(third);
  let (second, last) = rest.split_at(third);
  push_chunk(&mut out, b"IDAT", first);
  push_chunk(&mut out, b"IDAT", second);
  push_chunk(&mut out, b"IDAT", last);
  push_chunk(&mut out, b"IEND", &[]);
  out
}

fn zlib(filtered: &[u8]) -> Vec<u8> {
  miniz_oxide::deflate::compress_to_vec_zlib(filtered, 6)
}

#[test]
fn test_RawChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    for _ in RawChunkIter::from_chunk_bytes(&v) {
      //
    }
    let _ = decode_png(&v);
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in RawChunkIter::from_chunk_bytes(&v) {
      //
    }
  }
}

#[test]
fn test_random_pngs_never_panic() {
  // a real signature and header, followed by garbage
  for _ in 0..20 {
    let mut v = PNG_SIGNATURE.to_vec();
    push_chunk(&mut v, b"IHDR", &ihdr_payload(16, 16, 8, 2));
    v.extend_from_slice(&super::rand_bytes(512));
    let _ = decode_png(&v);
  }
  // a correct chunk structure around a random zlib stream
  for _ in 0..20 {
    let png = build_png(&ihdr_payload(8, 8, 8, 0), &super::rand_bytes(200), &[]);
    assert!(decode_png(&png).is_err());
  }
}

#[test]
fn test_two_by_two_sub_row() {
  let png = build_png(&ihdr_payload(2, 2, 8, 0), &zlib(&[0, 10, 20, 1, 5, 250]), &[]);
  let decoded = decode_png(&png).unwrap();
  assert_eq!(decoded.pixels.as_bytes(), &[10, 20, 5, 255]);
  assert_eq!(decoded.filter_tally.count(FilterType::None), 1);
  assert_eq!(decoded.filter_tally.count(FilterType::Sub), 1);
  assert_eq!(decoded.filter_tally.total(), 2);

  // a Sub row that wraps past 255
  let png = build_png(&ihdr_payload(2, 1, 8, 0), &zlib(&[1, 5, 255]), &[]);
  assert_eq!(decode_png(&png).unwrap().pixels.as_bytes(), &[5, 4]);
}

#[test]
fn test_round_trip_every_filter_and_layout() {
  // (bit depth, color type, bytes per pixel)
  let layouts = [(8, 0, 1), (16, 0, 2), (8, 2, 3), (16, 2, 6)];
  for (bit_depth, color_type, bpp) in layouts {
    for width in [1_u32, 2, 7] {
      for filter in FilterType::ALL {
        let height = 4_u32;
        let pixels = super::rand_bytes(width as usize * height as usize * bpp);
        // the chosen filter on every row, then mixed with the others
        for filters in [vec![filter], vec![filter, FilterType::Paeth, FilterType::Average]] {
          let filtered = filter_image(&pixels, width as usize, bpp, &filters);
          let png =
            build_png(&ihdr_payload(width, height, bit_depth, color_type), &zlib(&filtered), &[]);
          let decoded = decode_png(&png).unwrap_or_else(|e| {
            panic!("{filter:?} {width}x{height} depth {bit_depth} type {color_type}: {e}")
          });
          assert_eq!(decoded.pixels.as_bytes(), &pixels[..], "{filter:?} bpp {bpp} width {width}");
          assert_eq!(decoded.pixels.bytes_per_pixel(), bpp);
          assert_eq!(decoded.filter_tally.total(), height as usize);
        }
      }
    }
  }
}

#[test]
fn test_decoding_is_deterministic() {
  let pixels = super::rand_bytes(5 * 5 * 3);
  let filtered = filter_image(&pixels, 5, 3, &FilterType::ALL);
  let png = build_png(&ihdr_payload(5, 5, 8, 2), &zlib(&filtered), &[&b"Comment\0hi"[..]]);
  let first = decode_png(&png).unwrap();
  let second = decode_png(&png).unwrap();
  assert_eq!(first, second);
  assert_eq!(first.pixels.rgb8().unwrap().len(), 25);
  assert_eq!(first.pixels.pixel(4, 4), Some(&pixels[72..75]));
}

#[test]
fn test_text_entries_come_through() {
  let png = build_png(
    &ihdr_payload(1, 1, 8, 0),
    &zlib(&[0, 42]),
    &[&b"Title\0A Picture"[..], &b"Software\0minipng"[..], &b"NoSeparator"[..]],
  );
  let decoded = decode_png(&png).unwrap();
  assert_eq!(decoded.texts.len(), 3);
  assert_eq!(decoded.texts[0].as_bytes(), b"Title\0A Picture");
  assert_eq!(decoded.texts[1].keyword(), b"Software");
  assert_eq!(decoded.texts[2].text(), None);
  assert_eq!(decoded.pixels.as_bytes(), &[42]);
}

#[test]
fn test_short_input_is_invalid_format() {
  assert_eq!(decode_png(&PNG_SIGNATURE[..7]), Err(PngError::InvalidFormat));
  assert_eq!(decode_png(&[]), Err(PngError::InvalidFormat));
}

#[test]
fn test_truncated_header_chunk() {
  let mut png = PNG_SIGNATURE.to_vec();
  png.extend_from_slice(&20_u32.to_be_bytes());
  png.extend_from_slice(b"IHDR");
  png.extend_from_slice(&[1; 10]);
  assert_eq!(
    decode_png(&png),
    Err(PngError::TruncatedChunk { tag: ChunkTag::IHDR, declared: 24, available: 10 })
  );
}

#[test]
fn test_bad_filter_type_names_the_row() {
  let filtered = [0, 1, 2, 7, 3, 4, 0, 5, 6];
  let png = build_png(&ihdr_payload(2, 3, 8, 0), &zlib(&filtered), &[]);
  assert_eq!(decode_png(&png), Err(PngError::InvalidFilterType { row: 1, value: 7 }));
}

#[test]
fn test_decompressed_length_off_by_one() {
  let ihdr = ihdr_payload(2, 2, 8, 0);
  let short = build_png(&ihdr, &zlib(&[0, 1, 2, 0, 3]), &[]);
  assert_eq!(decode_png(&short), Err(PngError::SizeMismatch { expected: 6, actual: 5 }));
  let long = build_png(&ihdr, &zlib(&[0, 1, 2, 0, 3, 4, 5]), &[]);
  assert_eq!(decode_png(&long), Err(PngError::SizeMismatch { expected: 6, actual: 7 }));
  let far_too_long = build_png(&ihdr, &zlib(&[0; 500]), &[]);
  assert_eq!(decode_png(&far_too_long), Err(PngError::SizeMismatch { expected: 6, actual: 7 }));
}

#[test]
fn test_broken_zlib_streams() {
  let ihdr = ihdr_payload(4, 4, 8, 0);
  let filtered = [0_u8; 20];
  let good = zlib(&filtered);

  let cut = build_png(&ihdr, &good[..good.len() / 2], &[]);
  assert!(matches!(decode_png(&cut), Err(PngError::DecompressionError(_))));

  let mut bad_sum = good.clone();
  let last = bad_sum.len() - 1;
  bad_sum[last] ^= 0xFF;
  let png = build_png(&ihdr, &bad_sum, &[]);
  assert!(matches!(decode_png(&png), Err(PngError::DecompressionError(_))));
  let mut lenient = MinizInflater { ignore_adler32: true };
  let decoded = decode_png_with(&png, &DecodeConfig::default(), &mut lenient).unwrap();
  assert_eq!(decoded.pixels.as_bytes(), &[0; 16]);

  let not_zlib = build_png(&ihdr, &[0xFF; 12], &[]);
  assert!(matches!(decode_png(&not_zlib), Err(PngError::DecompressionError(_))));
}

#[test]
fn test_unsupported_layouts_are_rejected() {
  for (bit_depth, color_type, expected) in [
    (8, 3, Unsupported::ColorType(ColorType::Index)),
    (8, 4, Unsupported::ColorType(ColorType::YA)),
    (8, 6, Unsupported::ColorType(ColorType::RGBA)),
    (4, 0, Unsupported::SubByteDepth(4)),
  ] {
    let png = build_png(&ihdr_payload(2, 2, bit_depth, color_type), &zlib(&[0; 4]), &[]);
    assert_eq!(decode_png(&png), Err(PngError::Unsupported(expected)));
    // the header is still readable
    let payload = collect_payload(&png).unwrap();
    assert_eq!(payload.header.bit_depth, bit_depth);
  }
  let mut adam7 = ihdr_payload(2, 2, 8, 0);
  adam7[12] = 1;
  let png = build_png(&adam7, &zlib(&[0; 6]), &[]);
  assert_eq!(decode_png(&png), Err(PngError::Unsupported(Unsupported::Interlaced)));
}

#[test]
fn test_memory_limit() {
  let png = build_png(&ihdr_payload(64, 64, 16, 2), &zlib(&[0; 4]), &[]);
  let config = DecodeConfig::default().with_max_image_bytes(1024);
  assert_eq!(
    decode_png_with(&png, &config, &mut MinizInflater::default()),
    Err(PngError::ImageTooLarge { required: 64 * (1 + 64 * 6), limit: 1024 })
  );
  // a header claiming the maximum size never gets an allocation
  let huge = build_png(&ihdr_payload(u32::MAX, u32::MAX, 8, 0), &zlib(&[0; 4]), &[]);
  assert!(matches!(decode_png(&huge), Err(PngError::ImageTooLarge { .. })));
}

#[test]
fn test_missing_iend() {
  let mut png = build_png(&ihdr_payload(1, 1, 8, 0), &zlib(&[0, 1]), &[]);
  png.truncate(png.len() - 12);
  assert_eq!(decode_png(&png), Err(PngError::UnexpectedEof));
}

#[test]
fn test_error_messages() {
  let e = PngError::InvalidFilterType { row: 3, value: 9 };
  assert!(e.to_string().contains('3'));
  assert!(e.to_string().contains('9'));
  let e = PngError::TruncatedChunk { tag: ChunkTag::IDAT, declared: 24, available: 10 };
  assert!(e.to_string().contains("IDAT"));
}
