//! JSON-lines request/response contract between a front end and the engine.
//!
//! One request object per line, tagged by `op`; one response object per line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Load {
        path: PathBuf,
    },
    Bfs {
        start: i64,
        max_depth: i64,
    },
    Dfs {
        start: i64,
    },
    OutDegree {
        node: i64,
    },
    InDegree {
        node: i64,
    },
    Neighbors {
        node: i64,
    },
    Counts,
    HighestOutDegree,
    Memory,
    Subgraph {
        start: i64,
        max_depth: i64,
    },
    DegreeRanking {
        #[serde(default)]
        top_n: usize,
    },
    Status,
    Dump {
        rows: Option<usize>,
        cols: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ok(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(message.into()),
        }
    }
}
