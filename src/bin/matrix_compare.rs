use anyhow::Context;
use clap::Parser;
use relax2d::cli::CommonArgs;
use relax2d::dump::*;
use std::path::PathBuf;
use std::process::ExitCode;

/// Compare two matrix dumps value by value.
/// Exit code 0 when identical, 1 when they differ, 2 on errors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    left: PathBuf,

    right: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

fn run(args: &Args) -> anyhow::Result<Comparison> {
    args.common.setup("matrix_compare")?;
    let left = load_dump(&args.left)
        .with_context(|| format!("reading {:?}", args.left))?;
    let right = load_dump(&args.right)
        .with_context(|| format!("reading {:?}", args.right))?;
    Ok(compare_dumps(&left, &right))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(comparison) => {
            println!("{}", comparison);
            if comparison.is_identical() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
