//! neuronet: front end for the neuronet-core CSR graph engine.
//!
//! `query` loads an edge list and answers one operation; `serve` runs a
//! JSON-lines session on stdin/stdout so another process can drive the
//! engine; `dump` prints the truncated CSR arrays.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

mod config;
mod protocol;
mod session;
mod util;

use config::Settings;
use protocol::Request;
use session::Session;

#[derive(Parser)]
#[command(name = "neuronet")]
#[command(about = "Sparse directed-graph engine: load an edge list, query connectivity")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an edge list and answer a single query as JSON
    Query {
        file: PathBuf,
        #[command(subcommand)]
        op: QueryOp,
    },
    /// Serve JSON-lines requests on stdin, responses on stdout
    Serve {
        /// Edge list to load before reading requests
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print node/edge counts, memory and the first CSR entries
    Dump { file: PathBuf },
}

#[derive(Subcommand)]
enum QueryOp {
    /// Nodes within max_depth hops, with distances
    Bfs { start: i64, max_depth: i64 },
    /// Reachable nodes in DFS preorder
    Dfs { start: i64 },
    OutDegree { node: i64 },
    InDegree { node: i64 },
    Neighbors { node: i64 },
    /// Node and edge counts
    Counts,
    /// Node with the highest out-degree
    HighestOutDegree,
    /// Estimated memory of the CSR arrays
    Memory,
    /// Edges explored by a depth-bounded BFS
    Subgraph { start: i64, max_depth: i64 },
    /// Nodes ranked by total degree
    DegreeRanking {
        #[arg(long, default_value_t = 100)]
        top_n: usize,
    },
    Status,
}

impl From<QueryOp> for Request {
    fn from(op: QueryOp) -> Self {
        match op {
            QueryOp::Bfs { start, max_depth } => Request::Bfs { start, max_depth },
            QueryOp::Dfs { start } => Request::Dfs { start },
            QueryOp::OutDegree { node } => Request::OutDegree { node },
            QueryOp::InDegree { node } => Request::InDegree { node },
            QueryOp::Neighbors { node } => Request::Neighbors { node },
            QueryOp::Counts => Request::Counts,
            QueryOp::HighestOutDegree => Request::HighestOutDegree,
            QueryOp::Memory => Request::Memory,
            QueryOp::Subgraph { start, max_depth } => Request::Subgraph { start, max_depth },
            QueryOp::DegreeRanking { top_n } => Request::DegreeRanking { top_n },
            QueryOp::Status => Request::Status,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_logging(&cli.settings.log_level);

    let mut session = Session::new(&cli.settings);

    match cli.command {
        Commands::Query { file, op } => {
            load_or_bail(&mut session, file)?;
            let response = session.handle(op.into());
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.ok {
                std::process::exit(1);
            }
        }
        Commands::Serve { file } => {
            if let Some(file) = file {
                load_or_bail(&mut session, file)?;
            }
            let stdin = io::stdin();
            let stdout = BufWriter::new(io::stdout().lock());
            session
                .run(stdin.lock(), stdout)
                .context("session I/O failed")?;
        }
        Commands::Dump { file } => {
            load_or_bail(&mut session, file)?;
            let dump = session
                .engine()
                .debug_dump(cli.settings.dump_rows, cli.settings.dump_cols);
            print!("{}", dump);
        }
    }

    Ok(())
}

fn load_or_bail(session: &mut Session, file: PathBuf) -> anyhow::Result<()> {
    let response = session.handle(Request::Load { path: file.clone() });
    if !response.ok {
        bail!(
            "cannot load {}: {}",
            file.display(),
            response.error.unwrap_or_default()
        );
    }
    Ok(())
}
