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

//! FIFO depth sizing for pipelined dataflow graphs.
//!
//! Given the measured periodic characteristic functions of every stage,
//! computes for each inter-stage tensor the smallest buffer that keeps the
//! consumer from ever stalling on missing data.

mod config;
mod error;
mod orchestrator;
mod resolver;
pub mod solver;
pub mod specs;
mod store;

// Public types
// type to use for cycles
pub type Cycle = usize;

pub use crate::config::{FailurePolicy, SizingConfiguration};
pub use crate::error::Error;
pub use crate::orchestrator::{size_edge, size_fifos, FailedEdge, SizedEdge, SizingReport};
pub use crate::resolver::{EdgeResolver, StagePair};
pub use crate::solver::{align, solve, Alignment};
pub use crate::specs::{
    CharacteristicFunction, DataflowGraph, FifoDepth, GraphNode, Stage, Tensor,
};
pub use crate::store::CharacteristicStore;
pub use petgraph::graph::{EdgeIndex, NodeIndex};
pub use petgraph::Direction;
