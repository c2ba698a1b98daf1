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

//! typed access to measured characteristics and sized FIFO depths

use petgraph::prelude::*;

use crate::specs::{CharacteristicFunction, DataflowGraph, FifoDepth};
use crate::{Cycle, Error};

/// Narrow interface over per-stage characteristic data.
///
/// `Direction::Incoming` addresses the input (consumer) side of a stage,
/// `Direction::Outgoing` its output (producer) side.
pub trait CharacteristicStore {
    /// the characteristic function measured on one side of a stage
    fn characteristic_function(
        &self,
        stage: NodeIndex,
        side: Direction,
    ) -> Result<&CharacteristicFunction, Error>;

    fn period(&self, stage: NodeIndex, side: Direction) -> Result<Cycle, Error> {
        Ok(self.characteristic_function(stage, side)?.period())
    }

    /// the accumulated characteristic, `2 * period` entries long
    fn characteristic(&self, stage: NodeIndex, side: Direction) -> Result<&[usize], Error> {
        Ok(self.characteristic_function(stage, side)?.accumulated())
    }

    fn depth(&self, stage: NodeIndex, side: Direction) -> Result<Option<FifoDepth>, Error>;

    /// overwrite the depth slot of one side of a stage; nothing else changes
    fn set_depth(&mut self, stage: NodeIndex, side: Direction, depth: FifoDepth)
        -> Result<(), Error>;
}

impl CharacteristicStore for DataflowGraph {
    fn characteristic_function(
        &self,
        stage: NodeIndex,
        side: Direction,
    ) -> Result<&CharacteristicFunction, Error> {
        self.get_stage(stage)
            .ok_or(Error::InvalidStage(stage))?
            .characteristic(side)
            .ok_or(Error::MissingCharacteristic(stage, side))
    }

    fn depth(&self, stage: NodeIndex, side: Direction) -> Result<Option<FifoDepth>, Error> {
        Ok(self
            .get_stage(stage)
            .ok_or(Error::InvalidStage(stage))?
            .fifo_depth(side))
    }

    fn set_depth(
        &mut self,
        stage: NodeIndex,
        side: Direction,
        depth: FifoDepth,
    ) -> Result<(), Error> {
        self.get_stage_mut(stage)
            .ok_or(Error::InvalidStage(stage))?
            .set_fifo_depth(side, depth);
        Ok(())
    }
}
