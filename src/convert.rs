//! Edge-list conversion.
//!
//! Input format: one edge per line as `from<whitespace>to`; lines starting
//! with `#` are comments. Vertex names are arbitrary whitespace-free
//! strings, mapped to dense indices in first-seen order so results can be
//! reported under the original names.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use centra_engine::Graph;
use log::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    pub vertex_names: Vec<String>,
    pub edges: Vec<(u32, u32)>,
}

impl EdgeList {
    pub fn to_graph(&self, directed: bool) -> Result<Graph> {
        Ok(Graph::from_edges(
            self.vertex_names.len(),
            &self.edges,
            directed,
        )?)
    }
}

pub fn read_edge_list(path: &Path) -> Result<EdgeList> {
    let file = File::open(path)
        .with_context(|| format!("failed to open edge list {}", path.display()))?;
    parse_edge_list(BufReader::new(file))
}

pub fn parse_edge_list(reader: impl BufRead) -> Result<EdgeList> {
    let mut index: HashMap<String, u32> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut edges: Vec<(u32, u32)> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.context("failed to read edge list line")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            debug!("skipping line {}", line_number + 1);
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let (Some(from), Some(to)) = (fields.next(), fields.next()) else {
            bail!(
                "line {}: expected 'from to', got {:?}",
                line_number + 1,
                trimmed
            );
        };
        let from = intern(from, &mut index, &mut names);
        let to = intern(to, &mut index, &mut names);
        edges.push((from, to));
    }

    info!(
        "conversion complete: {} vertices, {} edges",
        names.len(),
        edges.len()
    );
    Ok(EdgeList {
        vertex_names: names,
        edges,
    })
}

fn intern(name: &str, index: &mut HashMap<String, u32>, names: &mut Vec<String>) -> u32 {
    if let Some(&id) = index.get(name) {
        return id;
    }
    let id = names.len() as u32;
    names.push(name.to_string());
    index.insert(name.to_string(), id);
    id
}
