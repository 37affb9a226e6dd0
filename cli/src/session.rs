use std::io::{BufRead, Write};

use neuronet_core::{Engine, EngineObserver, TracingObserver};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::protocol::{Request, Response};
use crate::util::check_non_negative;

/// One engine plus the front-end settings, answering requests in order.
pub struct Session<O = TracingObserver> {
    engine: Engine<O>,
    dump_rows: usize,
    dump_cols: usize,
}

impl Session<TracingObserver> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_engine(Engine::with_config(settings.engine_config()), settings)
    }
}

impl<O: EngineObserver> Session<O> {
    pub fn with_engine(engine: Engine<O>, settings: &Settings) -> Self {
        Self {
            engine,
            dump_rows: settings.dump_rows,
            dump_cols: settings.dump_cols,
        }
    }

    pub fn engine(&self) -> &Engine<O> {
        &self.engine
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match self.dispatch(request) {
            Ok(value) => Response::ok(value),
            Err(message) => Response::error(message),
        }
    }

    fn dispatch(&mut self, request: Request) -> Result<Value, String> {
        let engine = &mut self.engine;
        let value = match request {
            Request::Load { path } => {
                let summary = engine
                    .load(&path)
                    .map_err(|e| format!("load failed, previous graph kept: {}", e))?;
                json!({
                    "node_count": summary.node_count,
                    "edge_count": summary.edge_count,
                    "skipped_lines": summary.skipped_lines,
                    "memory_bytes": summary.memory_bytes,
                    "load_time_ms": summary.load_time.as_secs_f64() * 1000.0,
                    "generation": summary.generation,
                })
            }
            Request::Bfs { start, max_depth } => {
                let depth = check_non_negative(max_depth, "max_depth")?;
                let visits: Vec<(u32, u32)> = engine
                    .bfs(start, depth)
                    .into_iter()
                    .map(|v| (v.node_id, v.distance))
                    .collect();
                json!(visits)
            }
            Request::Dfs { start } => json!(engine.dfs(start)),
            Request::OutDegree { node } => json!(engine.out_degree(node)),
            Request::InDegree { node } => json!(engine.in_degree(node)),
            Request::Neighbors { node } => json!(engine.neighbors(node)),
            Request::Counts => json!({
                "node_count": engine.node_count(),
                "edge_count": engine.edge_count(),
            }),
            Request::HighestOutDegree => {
                let (node, degree) = engine.highest_out_degree_node();
                json!([node, degree])
            }
            Request::Memory => {
                let bytes = engine.memory_estimate();
                json!({
                    "bytes": bytes,
                    "mb": neuronet_core::bytes_to_mb(bytes),
                })
            }
            Request::Subgraph { start, max_depth } => {
                let depth = check_non_negative(max_depth, "max_depth")?;
                let edges: Vec<(u32, u32)> = engine
                    .subgraph_edges(start, depth)
                    .into_iter()
                    .map(|e| (e.from_id, e.to_id))
                    .collect();
                json!(edges)
            }
            Request::DegreeRanking { top_n } => {
                let ranked: Vec<Value> = engine
                    .degree_ranking(top_n)
                    .into_iter()
                    .map(|d| {
                        json!({
                            "node_id": d.node_id,
                            "out_degree": d.out_degree,
                            "in_degree": d.in_degree,
                            "total_degree": d.total_degree(),
                        })
                    })
                    .collect();
                json!(ranked)
            }
            Request::Status => {
                let status = engine.status();
                let state = if status.loaded { "loaded" } else { "not_loaded" };
                json!({
                    "status": state,
                    "source": status.source,
                    "node_count": status.node_count,
                    "edge_count": status.edge_count,
                    "memory_bytes": status.memory_bytes,
                    "skipped_lines": status.skipped_lines,
                    "load_time_ms": status.load_time.map(|t| t.as_secs_f64() * 1000.0),
                    "age_sec": status.age.map(|t| t.as_secs_f64()),
                    "generation": status.generation,
                })
            }
            Request::Dump { rows, cols } => {
                let dump = engine.debug_dump(
                    rows.unwrap_or(self.dump_rows),
                    cols.unwrap_or(self.dump_cols),
                );
                json!({
                    "node_count": dump.node_count,
                    "edge_count": dump.edge_count,
                    "memory_bytes": dump.memory_bytes,
                    "row_ptr": dump.row_ptr,
                    "column_indices": dump.column_indices,
                    "text": dump.to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Serve JSON-lines requests until `input` is exhausted. Malformed
    /// requests get an error response; the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.split(b'\n') {
            let line = line?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let response = match serde_json::from_slice::<Request>(&line) {
                Ok(request) => self.handle(request),
                Err(e) => {
                    tracing::warn!("rejected request: {}", e);
                    Response::error(format!("invalid request: {}", e))
                }
            };
            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
        }
        Ok(())
    }
}
