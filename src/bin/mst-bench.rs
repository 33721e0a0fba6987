use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mst_core::io::{info_report, parse_graph_file, print_json};
use mst_core::registry::{AlgorithmRegistry, Runner};

const BENCH_RUNS: u32 = 10;
const DEFAULT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(about = "Run and benchmark minimum-spanning-tree algorithms.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every algorithm and compare its result weight to the Kruskal reference.
    Test {
        graph_path: PathBuf,
        /// Restrict to these algorithm names (see `ls`).
        #[arg(long, num_args = 0..)]
        filter: Vec<String>,
    },
    /// Time each algorithm over repeated runs.
    Bench {
        graph_path: PathBuf,
        #[arg(long, num_args = 0..)]
        filter: Vec<String>,
    },
    /// Print graph statistics as JSON.
    Info { graph_path: PathBuf },
    /// List the registered algorithm names, one per line.
    Ls,
}

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Info).expect("logger can only be initialized once");

    // `Cli::parse()` exits the process itself (with clap's own usage-error
    // code) on a bad argument; `try_parse` lets us enforce this program's
    // documented exit code of 1 instead. `--help`/`--version` are reported
    // through the same `Err` path but aren't failures, so they keep exiting 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = e.exit_code();
            e.print().expect("failed to write usage error to stderr");
            return if code == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE };
        }
    };
    let registry = AlgorithmRegistry::new();

    match cli.command {
        Commands::Ls => {
            for name in registry.names() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Commands::Info { graph_path } => match parse_graph_file(&graph_path) {
            Ok(graph) => {
                println!("{}", serde_json::to_string(&info_report(&graph)).unwrap());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Commands::Test { graph_path, filter } => match parse_graph_file(&graph_path) {
            Ok(graph) => {
                log::info!("running test on {}", graph_path.display());
                let runner = Runner::new(&graph);
                let algorithms = registry.select(&filter);
                let results: BTreeMap<String, bool> =
                    runner.test(&algorithms, DEFAULT_SEED).into_iter().collect();
                print_json(&results);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Commands::Bench { graph_path, filter } => match parse_graph_file(&graph_path) {
            Ok(graph) => {
                log::info!("running bench on {}", graph_path.display());
                let runner = Runner::new(&graph);
                let algorithms = registry.select(&filter);
                let results: BTreeMap<String, f64> = runner
                    .bench(&algorithms, DEFAULT_SEED, BENCH_RUNS)
                    .into_iter()
                    .collect();
                print_json(&results);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}
