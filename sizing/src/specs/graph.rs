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

//! dataflow graph topology
//!
//! A dataflow graph is a set of stages connected by tensors, one edge per
//! named tensor. Graph-level inputs and outputs are modelled as boundary
//! nodes, so that every tensor has exactly two endpoints; tensors touching a
//! boundary node carry no inter-stage buffer.

use petgraph::graph;
use petgraph::graph::EdgeReference;

use super::*;

#[derive(Clone, Debug, PartialEq)]
pub enum GraphNode {
    Stage(Stage),
    /// graph input or output port
    Boundary(String),
}

impl GraphNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Stage(stage) => stage.name(),
            Self::Boundary(name) => name,
        }
    }

    pub fn as_stage(&self) -> Option<&Stage> {
        match self {
            Self::Stage(stage) => Some(stage),
            Self::Boundary(_) => None,
        }
    }

    pub fn as_stage_mut(&mut self) -> Option<&mut Stage> {
        match self {
            Self::Stage(stage) => Some(stage),
            Self::Boundary(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tensor {
    name: String,
}

impl Tensor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Default)]
pub struct DataflowGraph {
    pub(crate) topo: Graph<GraphNode, Tensor>,
}

impl DataflowGraph {
    pub fn new() -> Self {
        Self { topo: Graph::new() }
    }

    pub fn add_stage(&mut self, stage: Stage) -> NodeIndex {
        self.topo.add_node(GraphNode::Stage(stage))
    }

    /// add a graph input or output port
    pub fn add_boundary(&mut self, name: &str) -> NodeIndex {
        self.topo.add_node(GraphNode::Boundary(name.to_string()))
    }

    /// connect `src` to `dst` through the named tensor
    ///
    /// every tensor has a single producer and a single consumer, so a name
    /// may only be connected once.
    pub fn connect(&mut self, src: NodeIndex, dst: NodeIndex, tensor: &str) -> EdgeIndex {
        assert!(
            self.get_tensor_by_name(tensor).is_none(),
            "Tensor {} already connected!",
            tensor
        );
        self.topo.add_edge(src, dst, Tensor::new(tensor))
    }

    pub fn is_empty(&self) -> bool {
        self.topo.node_count() == 0
    }

    pub fn get_node(&self, node_id: NodeIndex) -> Option<&GraphNode> {
        self.topo.node_weight(node_id)
    }

    pub fn get_stage(&self, node_id: NodeIndex) -> Option<&Stage> {
        self.topo.node_weight(node_id).and_then(GraphNode::as_stage)
    }

    pub(crate) fn get_stage_mut(&mut self, node_id: NodeIndex) -> Option<&mut Stage> {
        self.topo
            .node_weight_mut(node_id)
            .and_then(GraphNode::as_stage_mut)
    }

    /// Returns the first node index matching name.
    pub fn get_node_index_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.topo
            .node_indices()
            .find(|n| self.topo[*n].name() == name)
    }

    pub fn get_tensor(&self, edge_id: EdgeIndex) -> Option<&Tensor> {
        self.topo.edge_weight(edge_id)
    }

    pub fn get_tensor_by_name(&self, name: &str) -> Option<EdgeIndex> {
        self.topo
            .edge_indices()
            .find(|e| self.topo[*e].name() == name)
    }

    pub fn get_tensor_endpoints(&self, edge_id: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.topo.edge_endpoints(edge_id)
    }

    /// returns an iterator over the stages only
    pub fn iter_stages(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.topo
            .node_indices()
            .filter(|n| self.topo[*n].as_stage().is_some())
    }

    /// returns an iterator over all tensors (their indices)
    pub fn iter_tensors(&self) -> graph::EdgeIndices {
        self.topo.edge_indices()
    }

    pub fn to_graphviz(&self) -> String {
        use petgraph::dot::{Config, Dot};

        let edge_attrs = |_, edge: EdgeReference<Tensor>| {
            let depth = self
                .get_stage(edge.source())
                .and_then(|stage| stage.fifo_depth(Direction::Outgoing));
            match depth {
                Some(depth) => format!("label=\"{}\ndepth = {}\"", edge.weight().name(), depth),
                None => format!("label=\"{}\"", edge.weight().name()),
            }
        };
        let node_attrs = |_, node: (NodeIndex, &GraphNode)| match node.1 {
            GraphNode::Stage(stage) => {
                format!("label=\"{}\n(id: {})\"", stage.name(), node.0.index())
            }
            GraphNode::Boundary(name) => format!("label=\"{}\"; shape=plaintext", name),
        };
        let generator = Dot::with_attr_getters(
            &self.topo,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &edge_attrs,
            &node_attrs,
        );
        format!("{:?}", generator)
    }
}

impl std::fmt::Display for DataflowGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_graphviz())
    }
}
