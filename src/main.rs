use std::{fs, process};

use checklang::{interpreter::evaluator::core::Context, run};
use clap::Parser;

/// check runs programs written in the Check scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells check to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Prints the value of the last top-level statement after the program's
    /// output.
    #[arg(short, long)]
    print_value: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents
    };

    let mut context = Context::new();
    let result = run(&script, &mut context);

    for line in context.output() {
        println!("{line}");
    }

    match result {
        Ok(value) if args.print_value => println!("{value}"),
        Ok(_) => {},
        Err(e) => {
            eprintln!("{}: {e}", e.kind());
            process::exit(1);
        },
    }
}
