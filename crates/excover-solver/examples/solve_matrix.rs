//! Example solving an exact cover instance read from a file.
//!
//! The matrix uses the textual format of `excover_core::Matrix`: one row per
//! line, `1`/`#` for set cells and `0`/`.`/`_` for clear cells.
//!
//! # Usage
//!
//! Solve the 6x7 instance from Knuth's paper:
//!
//! ```sh
//! cargo run --example solve_matrix
//! ```
//!
//! Solve a matrix from a file, or from standard input with `-`:
//!
//! ```sh
//! cargo run --example solve_matrix -- matrix.txt
//! ```
//!
//! Print search counters as well, and trace column choices:
//!
//! ```sh
//! RUST_LOG=excover_solver=trace cargo run --example solve_matrix -- --stats
//! ```

use std::{
    fs,
    io::{self, Read as _},
    path::PathBuf,
    process,
};

use clap::Parser;
use excover_core::Matrix;
use excover_solver::{format_solution, solve_matrix_with_stats};

const KNUTH_MATRIX: &str = "
0010110
1001001
0110010
1001000
0100001
0001101
";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Matrix file to solve, or `-` for standard input.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print search counters after the solution.
    #[arg(long)]
    stats: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let text = match read_input(args.input.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read input: {err}");
            process::exit(2);
        }
    };
    let matrix: Matrix = match text.parse() {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("Invalid matrix: {err}");
            process::exit(2);
        }
    };

    let (solution, stats) = match solve_matrix_with_stats(&matrix) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Solver failed: {err}");
            process::exit(1);
        }
    };

    match &solution {
        Some(solution) => println!("{}", format_solution(solution.rows())),
        None => println!("No solution."),
    }

    if args.stats {
        println!();
        println!("Stats:");
        println!("  Matrix: {}x{}, {} ones", matrix.height(), matrix.width(), matrix.ones());
        println!("  Calls: {}", stats.calls());
        println!("  Rows tried: {}", stats.rows_tried());
        println!("  Covers: {}", stats.covers());
        println!("  Max depth: {}", stats.max_depth());
    }

    if solution.is_none() {
        process::exit(1);
    }
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        None => Ok(KNUTH_MATRIX.to_owned()),
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => fs::read_to_string(path),
    }
}
