use clap::{App, Arg};
use log::{info, warn};
use nbtree_tools::{
    common_args, compress, decode, decode_opts, init_logging, read_input, write_output, Result,
};

fn main() -> Result<()> {
    init_logging();

    let matches = App::new("nbt-roundtrip")
        .about("Decode and re-encode an NBT file, checking the bytes match")
        .args(&common_args())
        .arg(
            Arg::with_name("out")
                .long("out")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    let input = read_input(matches.value_of("file").unwrap_or("-"))?;
    let decoded = decode(&input, decode_opts(&matches)?)?;
    let encoded = nbtree::to_bytes(&decoded.node)?;

    let original = &input.data[..decoded.consumed];
    if encoded == original {
        info!("round trip identical ({} bytes)", encoded.len());
    } else {
        let first_diff = encoded
            .iter()
            .zip(original)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| encoded.len().min(original.len()));
        warn!(
            "round trip differs: {} bytes in, {} bytes out, first difference at byte {}",
            original.len(),
            encoded.len(),
            first_diff
        );
    }

    if let Some(out) = matches.value_of("out") {
        let data = if input.gzipped {
            compress(&encoded)?
        } else {
            encoded
        };
        write_output(Some(out), &data)?;
        info!("wrote {}", out);
    }

    Ok(())
}
