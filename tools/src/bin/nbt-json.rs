use clap::{App, Arg};
use log::info;
use nbtree::pretty::render;
use nbtree_tools::{common_args, decode, decode_opts, init_logging, read_input, write_output, Result};

fn main() -> Result<()> {
    init_logging();

    let matches = App::new("nbt-json")
        .about("Export an NBT file as labelled JSON")
        .args(&common_args())
        .arg(
            Arg::with_name("out")
                .long("out")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("compact")
                .long("compact")
                .takes_value(false)
                .required(false),
        )
        .get_matches();

    let input = read_input(matches.value_of("file").unwrap_or("-"))?;
    let decoded = decode(&input, decode_opts(&matches)?)?;
    let rendered = render(&decoded.node);

    let mut json = if matches.is_present("compact") {
        serde_json::to_vec(&rendered)?
    } else {
        serde_json::to_vec_pretty(&rendered)?
    };
    json.push(b'\n');

    let out = matches.value_of("out");
    write_output(out, &json)?;
    if let Some(out) = out {
        info!("wrote {} bytes of JSON to {}", json.len(), out);
    }

    Ok(())
}
