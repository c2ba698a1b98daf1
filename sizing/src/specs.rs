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

//! dataflow graph specification: stages, tensors and their measured
//! characteristics.

use petgraph::prelude::*;

use crate::{Cycle, Error};

mod characteristic;
pub use characteristic::CharacteristicFunction;
mod graph;
pub use graph::{DataflowGraph, GraphNode, Tensor};
mod stage;
pub use stage::Stage;

/// buffer capacity, in elements, of the FIFO on a dataflow edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FifoDepth(pub usize);

impl std::fmt::Display for FifoDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
