use minipng::{png::*, PngError};

use std::{path::Path, process::ExitCode};

const USAGE: &str = "usage: minipng [--max-bytes N] [--ignore-adler32] FILE...";

fn main() -> ExitCode {
  env_logger::init();

  let mut config = DecodeConfig::default();
  let mut inflater = MinizInflater::default();
  let mut paths = Vec::new();
  let mut args = std::env::args().skip(1);
  while let Some(arg) = args.next() {
    match arg.as_str() {
      "--max-bytes" => match args.next().and_then(|n| n.parse::<usize>().ok()) {
        Some(n) => config = config.with_max_image_bytes(n),
        None => {
          eprintln!("--max-bytes needs a byte count\n{USAGE}");
          return ExitCode::from(2);
        }
      },
      "--ignore-adler32" => inflater.ignore_adler32 = true,
      "-h" | "--help" => {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
      }
      _ => paths.push(arg),
    }
  }
  if paths.is_empty() {
    eprintln!("{USAGE}");
    return ExitCode::from(2);
  }

  let mut failed = false;
  for path in &paths {
    if paths.len() > 1 {
      println!("== {path}");
    }
    if let Err(e) = print_png_info(path.as_ref(), &config, &mut inflater) {
      eprintln!("{path}: {e}");
      failed = true;
    }
  }
  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

#[derive(Debug)]
enum CliError {
  Io(std::io::Error),
  Png(PngError),
}
impl From<std::io::Error> for CliError {
  fn from(e: std::io::Error) -> Self {
    Self::Io(e)
  }
}
impl From<PngError> for CliError {
  fn from(e: PngError) -> Self {
    Self::Png(e)
  }
}
impl std::fmt::Display for CliError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "can't read file: {e}"),
      Self::Png(e) => write!(f, "{e}"),
    }
  }
}

fn print_png_info(
  path: &Path, config: &DecodeConfig, inflater: &mut MinizInflater,
) -> Result<(), CliError> {
  let bytes = std::fs::read(path)?;
  let PngPayload { header, compressed, texts, skipped } = collect_payload(&bytes)?;

  println!("PNG Information:");
  println!("  Width: {}", header.width);
  println!("  Height: {}", header.height);
  println!("  Bit Depth: {}", header.bit_depth);
  println!("  Color Type: {} ({})", header.color_type as u8, header.color_type.name());
  println!("  Compression Method: {}", header.compression_method);
  println!("  Filter Method: {}", header.filter_method);
  println!("  Interlace Method: {} ({})", header.interlace_method, header.interlace_name());
  if !texts.is_empty() {
    println!("Text Data:");
    for (i, text) in texts.iter().enumerate() {
      println!("  Text[{i}]: {text}");
    }
  }
  if !skipped.is_empty() {
    let names: Vec<String> = skipped.iter().map(ToString::to_string).collect();
    println!("Skipped Chunks: {}", names.join(", "));
  }
  println!("IDAT Size: {} bytes", compressed.len());

  let bpp = header.bytes_per_pixel()?;
  let filtered = decompress_payload(&header, &compressed, config, inflater)?;
  drop(compressed);
  println!("Decompressed Size: {} bytes", filtered.len());

  let (pixels, tally) = unfilter_to_vec(&filtered, header.width, header.height, bpp)?;
  println!("Pixel Data: {} bytes ({} per row)", pixels.as_bytes().len(), pixels.stride());
  println!("Filter Types: {tally}");
  Ok(())
}
