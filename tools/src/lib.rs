//! File handling shared by the `nbt` binary: reading input, GZip detection,
//! and writing output. The codec itself lives in `nbtree` and never touches
//! files.
use std::error::Error;
use std::fmt::Display;
use std::io::{Read, Write};

use clap::{Arg, ArgMatches};
use env_logger::Env;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, warn};
use nbtree::{Decoded, DeOpts};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug)]
struct ErrorMessage(String);
impl std::error::Error for ErrorMessage {}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NBT data read from a file, decompressed if it was GZip.
pub struct Input {
    pub data: Vec<u8>,
    pub gzipped: bool,
}

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Decompress `raw` if it looks like GZip, otherwise use it as is.
pub fn prepare(raw: Vec<u8>) -> Result<Input> {
    if !is_gzip(&raw) {
        return Ok(Input {
            data: raw,
            gzipped: false,
        });
    }

    let mut data = vec![];
    GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
    debug!("decompressed {} bytes to {}", raw.len(), data.len());

    Ok(Input {
        data,
        gzipped: true,
    })
}

/// Read a file, or stdin if `path` is `-`.
pub fn read_input(path: &str) -> Result<Input> {
    let raw = if path == "-" {
        let mut buf = vec![];
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path)?
    };

    prepare(raw)
}

/// Decode the input, warning about anything left after the root tag.
pub fn decode(input: &Input, opts: DeOpts) -> Result<Decoded> {
    let decoded = nbtree::decode_with_opts(&input.data, opts)?;
    if decoded.trailing > 0 {
        warn!(
            "{} bytes after the root tag were ignored",
            decoded.trailing
        );
    }
    Ok(decoded)
}

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Write to a file, or stdout if `path` is `None`.
pub fn write_output(path: Option<&str>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)?,
        None => std::io::stdout().write_all(data)?,
    }
    Ok(())
}

pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Arguments every binary takes: the input file and the text policy.
pub fn common_args() -> [Arg<'static, 'static>; 2] {
    [
        Arg::with_name("file")
            .takes_value(true)
            .required(true)
            .help("NBT file, optionally GZip compressed, or - for stdin"),
        Arg::with_name("text")
            .long("text")
            .takes_value(true)
            .required(false)
            .possible_values(&["strict", "lossy"])
            .default_value("strict"),
    ]
}

pub fn decode_opts(matches: &ArgMatches) -> Result<DeOpts> {
    let policy = text_policy(matches.value_of("text").unwrap_or("strict"))?;
    Ok(DeOpts::new().text(policy))
}

/// Parse a text policy name given on the command line.
pub fn text_policy(name: &str) -> Result<nbtree::TextPolicy> {
    match name {
        "strict" => Ok(nbtree::TextPolicy::Strict),
        "lossy" => Ok(nbtree::TextPolicy::Lossy),
        other => Err(Box::new(ErrorMessage(format!(
            "unknown text policy '{}', expected strict or lossy",
            other
        )))),
    }
}
