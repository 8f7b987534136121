use anyhow::Context;
use relax2d::cli::LaplaceArgs;
use relax2d::dump;
use relax2d::heatmap;
use relax2d::solver::*;
use relax2d::util::timed;

fn main() -> anyhow::Result<()> {
    let args = LaplaceArgs::cli_setup("laplace")?;
    let params = args.solver_parameters();
    let backend = args.backend();
    log::info!("backend: {}", backend);

    let (solved, elapsed) = timed(|| {
        let mut solver = StencilSolver::new(params, backend)?;
        let outcome = solver.solve();
        anyhow::Ok((solver, outcome))
    });
    let (solver, outcome) = solved.context("setting up the solver")?;
    let grid = solver.result();

    println!("{}", outcome);
    if grid.size() <= args.print_limit {
        dump::print_grid(grid);
    }
    println!("time = {} ms", elapsed.as_millis());

    if let Some(path) = args.dump_path() {
        dump::save_dump(grid, &path, args.field_width)
            .with_context(|| format!("writing {:?}", path))?;
    }
    if args.write_image {
        if let Some(path) = args.image_path() {
            heatmap::write_png(grid, &path)
                .with_context(|| format!("writing {:?}", path))?;
        }
    }

    args.common.finish();
    Ok(())
}
