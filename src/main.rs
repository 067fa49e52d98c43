use docopt::Docopt;
use log::info;
use serde_derive::Deserialize;
use mazegen::{
    generators,
    units::{ColumnsCount, RowsCount},
    MazeCoordinate,
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--rows=<r>] [--columns=<c>] [--start-row=<sr>] [--start-column=<sc>] [--exit-row=<er>] [--exit-column=<ec>] [--seed=<s>]

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of maze cell rows [default: 25].
    --columns=<c>          Number of maze cell columns [default: 25].
    --start-row=<sr>       Row of the entrance cell, negative counts from the bottom [default: 0].
    --start-column=<sc>    Column of the entrance cell, negative counts from the right [default: 0].
    --exit-row=<er>        Row of the exit cell, negative counts from the bottom [default: -1].
    --exit-column=<ec>     Column of the exit cell, negative counts from the right [default: -1].
    --seed=<s>             Seed for a reproducible maze. Random if not given.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_columns: usize,
    flag_start_row: isize,
    flag_start_column: isize,
    flag_exit_row: isize,
    flag_exit_column: isize,
    flag_seed: Option<u64>,
}

// The driver keeps its own errors, linking the library's and wrapping argument parsing failures.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        if let ErrorKind::DocOptFailure(ref docopt_err) = *e.kind() {
            docopt_err.exit();
        }
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let rows = RowsCount(args.flag_rows);
    let columns = ColumnsCount(args.flag_columns);
    let start = MazeCoordinate::new(args.flag_start_row, args.flag_start_column);
    let exit = MazeCoordinate::new(args.flag_exit_row, args.flag_exit_column);

    let generated = match args.flag_seed {
        Some(seed) => {
            info!("Generating {} x {} maze from seed {}", rows.0, columns.0, seed);
            generators::generate_seeded(rows, columns, start, exit, seed)
        }
        None => {
            info!("Generating {} x {} maze", rows.0, columns.0);
            generators::generate(rows, columns, start, exit)
        }
    };
    let maze = generated
        .chain_err(|| format!("Failed to generate a {} x {} maze", rows.0, columns.0))?;

    println!("{}", maze);

    Ok(())
}
