use std::{fs, process::ExitCode};

use clap::{Parser, ValueEnum};
use dashu::float::DBig;
use exprtree::{Error, Number};
use tracing::Level;

/// exprtree parses arithmetic statements into expression trees and evaluates
/// them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells exprtree to read the statements from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Numeric type the statements are parsed and evaluated with.
    #[arg(short, long, value_enum, default_value_t = NumberArg::Integer)]
    number: NumberArg,

    /// Prints the tree of every statement before the result.
    #[arg(short, long)]
    tree: bool,

    /// Logs parsing and evaluation steps to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Semicolon-separated statements, or a file path with `--file`.
    contents: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NumberArg {
    /// 64-bit integers.
    Integer,
    /// 64-bit floating point numbers.
    Real,
    /// Arbitrary precision decimals.
    Decimal,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
                             .with_writer(std::io::stderr)
                             .init();

    let context = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(context) => context,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let outcome = match args.number {
        NumberArg::Integer => run::<i64>(&context, args.tree),
        NumberArg::Real => run::<f64>(&context, args.tree),
        NumberArg::Decimal => run::<DBig>(&context, args.tree),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run<N: Number>(context: &str, print_trees: bool) -> Result<(), Error> {
    let statements = exprtree::parse::<N>(context)?;

    if print_trees {
        for statement in &statements {
            println!("{statement}");
        }
    }

    match exprtree::evaluate_statements(&statements)? {
        Some(value) => println!("{value}"),
        None => tracing::warn!("no statement could be evaluated"),
    }

    Ok(())
}
