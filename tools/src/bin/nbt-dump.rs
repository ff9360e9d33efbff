use clap::App;
use nbtree_tools::{common_args, decode, decode_opts, init_logging, read_input, Result};

fn main() -> Result<()> {
    init_logging();

    let matches = App::new("nbt-dump")
        .about("Print an indented dump of an NBT file")
        .args(&common_args())
        .get_matches();

    let input = read_input(matches.value_of("file").unwrap_or("-"))?;
    let decoded = decode(&input, decode_opts(&matches)?)?;

    print!("{}", decoded.node);
    Ok(())
}
