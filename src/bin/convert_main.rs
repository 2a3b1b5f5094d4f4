//! CSV to HTY converter
//!
//! Usage:
//!   hty-convert data.csv data.hty

use std::path::PathBuf;
use std::process;

use clap::Parser;

use htybase::ingest;

#[derive(Parser, Debug)]
#[command(name = "hty-convert")]
#[command(about = "Convert a CSV file into the HTY columnar format")]
#[command(version)]
struct Args {
    /// Source CSV file (first line is the header)
    csv: PathBuf,

    /// Destination HTY file
    hty: PathBuf,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match ingest::convert_csv_to_hty(&args.csv, &args.hty) {
        Ok(schema) => {
            println!(
                "wrote {} ({} rows, {} columns)",
                args.hty.display(),
                schema.num_rows,
                schema.groups[0].columns.len()
            );
        }
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            process::exit(1);
        }
    }
}
