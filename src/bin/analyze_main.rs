//! HTY query tool
//!
//! Usage:
//!   hty-analyze metadata data.hty
//!   hty-analyze project data.hty --columns age,score
//!   hty-analyze filter data.hty --column age --op '>' --value 25
//!   hty-analyze project-filter data.hty --columns score --column age --op 1 --value 25
//!   hty-analyze add-rows data.hty --row 50,1.5 --row 60,2.0 [--output new.hty]

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use htybase::{
    append_rows, append_rows_in_place, filter, project_and_filter, project_columns, read_trailer,
    CompareOp, HtyError, HtySchema, ResultSet, Scalar,
};

#[derive(Parser, Debug)]
#[command(name = "hty-analyze")]
#[command(about = "Inspect and query HTY columnar files")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trailer schema as JSON
    Metadata { file: PathBuf },

    /// Project one or more columns across all rows
    Project {
        file: PathBuf,

        /// Column names, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
    },

    /// Filter one column by a predicate and print the matching values
    Filter {
        file: PathBuf,

        #[arg(long)]
        column: String,

        /// Operator: a code 1..=6 or one of > >= < <= == !=
        #[arg(long)]
        op: String,

        /// Literal, parsed per the column's declared type
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Project columns for the rows matching a predicate
    ProjectFilter {
        file: PathBuf,

        /// Columns to project, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Column the predicate applies to
        #[arg(long)]
        column: String,

        /// Operator: a code 1..=6 or one of > >= < <= == !=
        #[arg(long)]
        op: String,

        /// Literal, parsed per the column's declared type
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Append rows (comma-separated values in schema order, one --row each)
    AddRows {
        file: PathBuf,

        #[arg(long = "row", required = true)]
        rows: Vec<String>,

        /// Write to this path instead of atomically replacing the source
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(args.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> htybase::Result<()> {
    match command {
        Command::Metadata { file } => {
            let schema = read_trailer(&file)?;
            let json = serde_json::to_string_pretty(&schema)
                .map_err(|e| HtyError::SchemaParse(e.to_string()))?;
            println!("{}", json);
        }
        Command::Project { file, columns } => {
            let schema = read_trailer(&file)?;
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            let table = project_columns(&schema, &file, &names)?;
            print_table(&table);
        }
        Command::Filter {
            file,
            column,
            op,
            value,
        } => {
            let schema = read_trailer(&file)?;
            let op = parse_op(&op)?;
            let literal = parse_literal(&schema, &column, &value)?;
            let matched = filter(&schema, &file, &column, op, literal)?;
            println!("{}", column);
            for value in matched {
                println!("{}", value);
            }
        }
        Command::ProjectFilter {
            file,
            columns,
            column,
            op,
            value,
        } => {
            let schema = read_trailer(&file)?;
            let op = parse_op(&op)?;
            let literal = parse_literal(&schema, &column, &value)?;
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            let table = project_and_filter(&schema, &file, &names, &column, op, literal)?;
            print_table(&table);
        }
        Command::AddRows { file, rows, output } => {
            let mut schema = read_trailer(&file)?;
            let parsed = parse_rows(&schema, &rows)?;
            match output {
                Some(output) => {
                    append_rows(&mut schema, &file, &output, &parsed)?;
                    println!("wrote {} ({} rows)", output.display(), schema.num_rows);
                }
                None => {
                    append_rows_in_place(&mut schema, &file, &parsed)?;
                    println!("updated {} ({} rows)", file.display(), schema.num_rows);
                }
            }
        }
    }
    Ok(())
}

fn parse_op(op: &str) -> htybase::Result<CompareOp> {
    match op {
        ">" => Ok(CompareOp::GreaterThan),
        ">=" => Ok(CompareOp::GreaterEqual),
        "<" => Ok(CompareOp::LessThan),
        "<=" => Ok(CompareOp::LessEqual),
        "=" | "==" => Ok(CompareOp::Equal),
        "!=" => Ok(CompareOp::NotEqual),
        code => CompareOp::from_code(code.parse().unwrap_or(0)),
    }
}

/// Encode a literal per the filtered column's declared type
fn parse_literal(schema: &HtySchema, column: &str, value: &str) -> htybase::Result<Scalar> {
    let group = schema.primary_group()?;
    let (_, dtype) = group
        .find_column(column)
        .ok_or_else(|| HtyError::ColumnNotFound(column.to_string()))?;
    Scalar::parse_token(value, dtype)
}

/// Parse `--row` values against the schema's column order
fn parse_rows(schema: &HtySchema, rows: &[String]) -> htybase::Result<Vec<Vec<Scalar>>> {
    let group = schema.primary_group()?;
    rows.iter()
        .map(|row| {
            let tokens: Vec<&str> = row.split(',').map(str::trim).collect();
            if tokens.len() != group.columns.len() {
                return Err(HtyError::ColumnCountMismatch {
                    expected: group.columns.len(),
                    actual: tokens.len(),
                });
            }
            tokens
                .iter()
                .zip(&group.columns)
                .map(|(token, def)| Scalar::parse_token(token, def.dtype))
                .collect()
        })
        .collect()
}

fn print_table(table: &ResultSet) {
    let header: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    println!("{}", header.join(", "));
    for row in 0..table.num_rows() {
        let fields: Vec<String> = table
            .columns
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        println!("{}", fields.join(", "));
    }
}
