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

//! Enumerates the producer/consumer stage pairs of a dataflow graph.

use petgraph::graph;
use petgraph::prelude::*;

use crate::specs::DataflowGraph;

/// A tensor edge with a stage on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StagePair {
    pub edge: EdgeIndex,
    pub producer: NodeIndex,
    pub consumer: NodeIndex,
}

/// Lazy iterator over the sizable edges of a graph.
///
/// Tensors with a graph boundary on either end are skipped; they carry no
/// inter-stage buffer. The traversal holds no state besides its position, so
/// calling [`DataflowGraph::sizable_edges`] again restarts it.
pub struct EdgeResolver<'a> {
    graph: &'a DataflowGraph,
    edges: graph::EdgeIndices,
}

impl<'a> EdgeResolver<'a> {
    pub fn new(graph: &'a DataflowGraph) -> Self {
        Self {
            graph,
            edges: graph.iter_tensors(),
        }
    }
}

impl<'a> Iterator for EdgeResolver<'a> {
    type Item = StagePair;

    fn next(&mut self) -> Option<StagePair> {
        for edge in self.edges.by_ref() {
            let (src, dst) = match self.graph.get_tensor_endpoints(edge) {
                Some(endpoints) => endpoints,
                None => continue,
            };
            if self.graph.get_stage(src).is_none() || self.graph.get_stage(dst).is_none() {
                log::trace!(
                    "skipping boundary tensor {} ({} -> {})",
                    edge.index(),
                    src.index(),
                    dst.index()
                );
                continue;
            }
            return Some(StagePair {
                edge,
                producer: src,
                consumer: dst,
            });
        }
        None
    }
}

impl DataflowGraph {
    /// producer/consumer pairs for every tensor between two stages
    pub fn sizable_edges(&self) -> EdgeResolver<'_> {
        EdgeResolver::new(self)
    }
}
