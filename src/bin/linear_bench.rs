use anyhow::Context;
use clap::{Parser, Subcommand};
use relax2d::backend::*;
use relax2d::cli::CommonArgs;
use relax2d::linear::*;
use relax2d::util::timed;

/// Dense linear algebra benchmarks, serial vs parallel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// How rows are spread over threads
    #[arg(short, long, value_enum, default_value_t = BackendKind::Banded)]
    backend: BackendKind,

    /// Rows per task for the rayon backend
    #[arg(long, default_value = "64")]
    chunk_size: usize,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// y = A x with A[i][j] = j and x[j] = j
    Matvec {
        #[arg(long, default_value = "10000")]
        rows: usize,

        #[arg(long, default_value = "10000")]
        cols: usize,
    },

    /// Simple iteration on A = 2 on the diagonal, 1 elsewhere, b = n + 1
    Iterate {
        #[arg(short, long, default_value = "17000")]
        n: usize,

        #[arg(long, default_value = "0.0001")]
        tau: f64,

        #[arg(long, default_value = "0.00001")]
        epsilon: f64,

        #[arg(long, default_value = "100000")]
        max_iterations: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.common.setup("linear_bench")?;
    let backend =
        Backend::from_kind(args.backend, args.chunk_size, args.common.threads);
    log::info!("backend: {}", backend);

    match args.command {
        Command::Matvec { rows, cols } => {
            let (a, x) = course_matvec(rows, cols)
                .context("allocating the matrix")?;
            let (y, report) = matvec_speedup(&backend, &a, &x)?;
            if let Some(first) = y.first() {
                println!("y[0] = {}", first);
            }
            println!("{}", report);
        }
        Command::Iterate {
            n,
            tau,
            epsilon,
            max_iterations,
        } => {
            let (a, b) = course_system(n).context("allocating the system")?;
            let mut x = vec![0.0; n];
            let solver = SimpleIteration::new(tau, epsilon, max_iterations);
            let (outcome, elapsed) =
                timed(|| solver.solve(&backend, &a, &b, &mut x));
            let outcome = outcome?;
            println!("{}", outcome);
            for (i, v) in x.iter().take(10).enumerate() {
                println!("x{} = {}", i, v);
            }
            println!("time = {:.6} s", elapsed.as_secs_f64());
        }
    }

    args.common.finish();
    Ok(())
}
