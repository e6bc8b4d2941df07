use std::{fs, io};

use clap::Parser;
use strukta::{interpret, printer};

/// strukta runs scripts written in a small imperative language with structs,
/// variants and by-reference parameters.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the parsed statement tree instead of running the script.
    #[arg(short, long)]
    ast: bool,

    /// Path of the script to run.
    file: String,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
                     eprintln!("Failed to read the input file '{}'. Perhaps this file does not \
                                exist?",
                               &args.file);
                     std::process::exit(1);
                 });

    if args.ast {
        match strukta::parse(&source) {
            Ok(program) => println!("{}", printer::dump(&program)),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    if let Err(e) = interpret(&source, io::stdout().lock()) {
        eprintln!("{e}");
    }
}
