use prepcont::cfg::PrepCfg;

use std::path::PathBuf;

use clap::Parser;

/// Prints the built-in configuration as YAML, to be edited and passed back
/// with `--cfg`.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(short('o'), long("out"), value_name("output file"))]
    out: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let text = serde_yaml::to_string(&PrepCfg::default()).unwrap();

    match args.out {
        Some(path) => std::fs::write(&path, text).unwrap(),
        None => print!("{}", text),
    }
}
