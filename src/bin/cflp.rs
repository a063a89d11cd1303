use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use u_cflp::problem::ProblemLoader;
use u_cflp::solver::{Algorithm, AnnealingConfig, Solver};

fn cli() -> Command {
    Command::new("cflp")
        .about("Capacitated facility location problem solver")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solve a capacitated facility location problem")
                .arg(
                    arg!(-a --alg <ALG> "Algorithm: greedy, brute-force or sa")
                        .value_parser(clap::value_parser!(Algorithm)),
                )
                .arg(
                    arg!(-i --input <INPUT> "Path of a problem file, or 'all' for the batch run")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the random source; drawn at random if unset")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--temperature [T] "Annealing initial temperature")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--outer [N] "Annealing temperature steps")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--inner [N] "Annealing moves per temperature step")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--instances [DIR] "Batch mode: directory holding p1..pN")
                        .default_value("res/instances")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--results [DIR] "Batch mode: output root, one subdirectory per algorithm")
                        .default_value("res/results")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--count [COUNT] "Batch mode: number of instances")
                        .default_value("71")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    enable_tracing();
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn solve(m: &ArgMatches) -> Result<()> {
    let algorithm = *m
        .get_one::<Algorithm>("alg")
        .ok_or_else(|| anyhow!("--alg is required"))?;
    let input = m
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("--input is required"))?;
    let solver = build_solver(m)?;

    if input != "all" {
        return solve_one(&solver, algorithm, Path::new(input));
    }

    let instances = m
        .get_one::<PathBuf>("instances")
        .ok_or_else(|| anyhow!("--instances is required"))?;
    let results = m
        .get_one::<PathBuf>("results")
        .ok_or_else(|| anyhow!("--results is required"))?;
    let count = *m.get_one::<usize>("count").unwrap_or(&71);
    solve_all(&solver, algorithm, instances, &results.join(algorithm.name()), count)
}

fn build_solver(m: &ArgMatches) -> Result<Solver> {
    let mut annealing = AnnealingConfig::default();
    if let Some(&t) = m.get_one::<f64>("temperature") {
        annealing = annealing.with_initial_temperature(t);
    }
    if let Some(&n) = m.get_one::<usize>("outer") {
        annealing = annealing.with_outer_iterations(n);
    }
    if let Some(&n) = m.get_one::<usize>("inner") {
        annealing = annealing.with_inner_iterations(n);
    }
    annealing
        .validate()
        .map_err(|e| anyhow!("invalid annealing settings: {e}"))?;

    let mut solver = Solver::new().with_annealing(annealing);
    if let Some(&seed) = m.get_one::<u64>("seed") {
        solver = solver.with_seed(seed);
    }
    Ok(solver)
}

fn solve_one(solver: &Solver, algorithm: Algorithm, path: &Path) -> Result<()> {
    let problem = ProblemLoader::new()
        .load_path(path)
        .with_context(|| format!("Failed to load problem '{}'", path.display()))?;
    let sol = solver
        .solve(&problem, algorithm)
        .with_context(|| format!("Failed to solve '{}'", path.display()))?;
    print!("{sol}");
    println!("time: {:.5}", sol.run_time_secs());
    Ok(())
}

fn solve_all(
    solver: &Solver,
    algorithm: Algorithm,
    instances: &Path,
    out_dir: &Path,
    count: usize,
) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create '{}'", out_dir.display()))?;

    let mut tbl = String::from(",Result,Time(s)\n");
    for i in 1..=count {
        let name = format!("p{i}");
        let path = instances.join(&name);
        let problem = ProblemLoader::new()
            .load_path(&path)
            .with_context(|| format!("Failed to load problem '{}'", path.display()))?;
        let sol = solver
            .solve(&problem, algorithm)
            .with_context(|| format!("Failed to solve '{}'", path.display()))?;

        let out = out_dir.join(&name);
        fs::write(&out, sol.to_string())
            .with_context(|| format!("Failed to write '{}'", out.display()))?;
        writeln!(tbl, "{name},{:.3},{:.5}", sol.cost(), sol.run_time_secs())?;
        tracing::info!(instance = %name, cost = sol.cost(), "instance done");
    }

    let tbl_path = out_dir.join("tbl");
    fs::write(&tbl_path, tbl)
        .with_context(|| format!("Failed to write '{}'", tbl_path.display()))?;
    Ok(())
}
