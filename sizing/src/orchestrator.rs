// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A sizing run over a whole dataflow graph.
//!
//! The run is a single pass: every sizable edge is solved from the
//! characteristics currently stored in the graph and its depth is written
//! to both the producer's output slot and the consumer's input slot. Depths
//! from an earlier run are overwritten, never merged.
//!
//! Solving is pure, so with `parallel` set the edges are solved
//! concurrently. Depths are always written afterwards, one edge at a time in
//! edge order; a stage side shared by several tensors therefore ends up with
//! the depth of the last of them, in either mode.

use petgraph::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;

use crate::config::{FailurePolicy, SizingConfiguration};
use crate::resolver::StagePair;
use crate::solver::{self, Alignment};
use crate::specs::{DataflowGraph, FifoDepth};
use crate::store::CharacteristicStore;
use crate::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizedEdge {
    pub pair: StagePair,
    pub tensor: String,
    pub alignment: Alignment,
}

#[derive(Debug, PartialEq, Eq)]
pub struct FailedEdge {
    pub pair: StagePair,
    pub tensor: String,
    pub error: Error,
}

/// Outcome of one sizing run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SizingReport {
    pub sized: Vec<SizedEdge>,
    /// only populated under `FailurePolicy::SkipAndContinue`
    pub failed: Vec<FailedEdge>,
    /// tensors connected to a graph input or output
    pub boundary_edges: usize,
}

impl SizingReport {
    /// total FIFO capacity over all sized edges
    pub fn total_depth(&self) -> usize {
        self.sized.iter().map(|e| e.alignment.depth.0).sum()
    }

    pub fn depth_of(&self, edge: EdgeIndex) -> Option<FifoDepth> {
        self.sized
            .iter()
            .find(|e| e.pair.edge == edge)
            .map(|e| e.alignment.depth)
    }
}

/// solve a single edge from the characteristics held by `store`
pub fn size_edge<S>(store: &S, pair: &StagePair) -> Result<Alignment, Error>
where
    S: CharacteristicStore + ?Sized,
{
    let producer = store.characteristic_function(pair.producer, Direction::Outgoing)?;
    let consumer = store.characteristic_function(pair.consumer, Direction::Incoming)?;

    let produced = producer.transferred_per_period();
    let consumed = consumer.transferred_per_period();
    if producer.period() == consumer.period() && produced != consumed {
        log::warn!(
            "tensor {}: producer emits {} elements per period, consumer takes {}",
            pair.edge.index(),
            produced,
            consumed
        );
    }
    solver::align(producer, consumer)
}

fn node_name(graph: &DataflowGraph, node: NodeIndex) -> &str {
    graph.get_node(node).map(|n| n.name()).unwrap_or("?")
}

/// size every inter-stage FIFO of `graph`
///
/// Under `FailurePolicy::Abort` the first failing edge ends the run with an
/// `Error::Edge`; depths written for the edges before it are kept.
pub fn size_fifos(
    graph: &mut DataflowGraph,
    config: &SizingConfiguration,
) -> Result<SizingReport, Error> {
    let pairs = graph.sizable_edges().collect::<Vec<_>>();
    let mut report = SizingReport {
        boundary_edges: graph.iter_tensors().count() - pairs.len(),
        ..Default::default()
    };

    let solved: Vec<Result<Alignment, Error>> = {
        let store: &DataflowGraph = graph;
        if config.parallel {
            pairs.par_iter().map(|pair| size_edge(store, pair)).collect()
        } else {
            pairs.iter().map(|pair| size_edge(store, pair)).collect()
        }
    };

    // stage side -> tensor that last wrote it
    let mut writers: HashMap<(NodeIndex, Direction), EdgeIndex> = HashMap::new();
    for (pair, result) in pairs.into_iter().zip(solved) {
        let tensor = graph
            .get_tensor(pair.edge)
            .map(|t| t.name().to_string())
            .unwrap_or_default();
        let alignment = match result {
            Ok(alignment) => alignment,
            Err(error) => {
                log::error!(
                    "cannot size tensor {} ({} -> {}): {}",
                    tensor,
                    node_name(graph, pair.producer),
                    node_name(graph, pair.consumer),
                    error
                );
                match config.failure_policy {
                    FailurePolicy::Abort => return Err(Error::Edge(pair.edge, Box::new(error))),
                    FailurePolicy::SkipAndContinue => {
                        report.failed.push(FailedEdge {
                            pair,
                            tensor,
                            error,
                        });
                        continue;
                    }
                }
            }
        };

        for (stage, side) in [
            (pair.producer, Direction::Outgoing),
            (pair.consumer, Direction::Incoming),
        ] {
            if let Some(previous) = writers.insert((stage, side), pair.edge) {
                log::warn!(
                    "stage {} shares a FIFO depth slot between tensors {} and {}; last one wins",
                    node_name(graph, stage),
                    previous.index(),
                    pair.edge.index()
                );
            }
            graph
                .set_depth(stage, side, alignment.depth)
                .map_err(|e| Error::Edge(pair.edge, Box::new(e)))?;
        }
        log::debug!(
            "tensor {} ({} -> {}): phase shift {}, depth {}",
            tensor,
            node_name(graph, pair.producer),
            node_name(graph, pair.consumer),
            alignment.shift,
            alignment.depth
        );
        report.sized.push(SizedEdge {
            pair,
            tensor,
            alignment,
        });
    }

    log::info!(
        "sized {} FIFOs (total depth {}), {} failed, {} boundary tensors skipped",
        report.sized.len(),
        report.total_depth(),
        report.failed.len(),
        report.boundary_edges
    );
    Ok(report)
}
