use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, ensure, Context, Result};
use clap::{Arg, ArgMatches, Command};

use hzip::HuffmanCodec;

const PLAIN_EXT: &str = "txt";
const COMPRESSED_EXT: &str = "hzip";

fn parse_arguments() -> ArgMatches {
    let input = Arg::new("input")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Input file path")
        .required(true);
    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Output file path (derived from the input name by default)");

    Command::new("hzip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compress or decompress text files with Huffman coding")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compress")
                .about("Compress <input> into a .hzip file")
                .arg(input.clone())
                .arg(output.clone()),
        )
        .subcommand(
            Command::new("decompress")
                .about("Restore the original file from a .hzip file")
                .arg(input)
                .arg(output),
        )
        .get_matches()
}

/// `notes.txt` → `notes.hzip`; any other name gets `.hzip` appended.
fn compressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == PLAIN_EXT) {
        return input.with_extension(COMPRESSED_EXT);
    }
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(COMPRESSED_EXT);
    PathBuf::from(name)
}

/// `notes.hzip` → `notes.txt`, `notes.md.hzip` → `notes.md`.
fn decompressed_path(input: &Path) -> Result<PathBuf> {
    if !input.extension().is_some_and(|ext| ext == COMPRESSED_EXT) {
        bail!("{} does not end in .{}", input.display(), COMPRESSED_EXT);
    }
    let stripped = input.with_extension("");
    if stripped.extension().is_some() {
        Ok(stripped)
    } else {
        Ok(stripped.with_extension(PLAIN_EXT))
    }
}

fn check_input(input: &Path) -> Result<()> {
    ensure!(input.is_file(), "input file {} not found", input.display());
    Ok(())
}

fn check_distinct(input: &Path, output: &Path) -> Result<()> {
    let same = match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(input), Ok(output)) => input == output,
        _ => input == output,
    };
    ensure!(!same, "output {} would overwrite the input", output.display());
    Ok(())
}

/// Create `output` only once its full contents are known, so a failed run
/// leaves nothing behind.
fn write_output(output: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(output, bytes).with_context(|| format!("writing {}", output.display()))
}

fn compress(input: &Path, output: Option<&PathBuf>) -> Result<()> {
    check_input(input)?;
    let output = output.cloned().unwrap_or_else(|| compressed_path(input));
    check_distinct(input, &output)?;

    eprintln!("Starting to compress {}", input.display());
    let start = Instant::now();

    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let mut compressed = Vec::new();
    let stats = HuffmanCodec::compress_stream(data.as_slice(), &mut compressed)
        .with_context(|| format!("compressing {}", input.display()))?;
    write_output(&output, &compressed)?;

    eprintln!(
        "Compressed {} -> {} ({} -> {} bytes, {:.1}%, {} symbols) in {:.3}s",
        input.display(),
        output.display(),
        stats.original_bytes,
        stats.compressed_bytes,
        stats.ratio() * 100.0,
        stats.distinct_symbols,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn decompress(input: &Path, output: Option<&PathBuf>) -> Result<()> {
    check_input(input)?;
    let output = match output {
        Some(path) => path.clone(),
        None => decompressed_path(input)?,
    };
    check_distinct(input, &output)?;

    eprintln!("Starting to decompress {}", input.display());
    let start = Instant::now();

    let container = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let mut restored = Vec::new();
    let written = HuffmanCodec::decompress_stream(container.as_slice(), &mut restored)
        .with_context(|| format!("decompressing {}", input.display()))?;
    write_output(&output, &restored)?;

    eprintln!(
        "Decompressed {} -> {} ({} bytes) in {:.3}s",
        input.display(),
        output.display(),
        written,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> Result<()> {
    let matches = parse_arguments();

    match matches.subcommand() {
        Some(("compress", args)) => {
            let input = args.get_one::<PathBuf>("input").context("missing input")?;
            compress(input, args.get_one::<PathBuf>("output"))
        }
        Some(("decompress", args)) => {
            let input = args.get_one::<PathBuf>("input").context("missing input")?;
            decompress(input, args.get_one::<PathBuf>("output"))
        }
        _ => bail!("unknown command; use compress or decompress"),
    }
}
