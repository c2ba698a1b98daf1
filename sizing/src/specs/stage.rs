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

//! per-stage records

use super::*;

/// A pipeline stage with distinct input-side and output-side periodic
/// behavior.
///
/// Both sides share one characteristic slot and one depth slot each, no
/// matter how many ports the stage has on that side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stage {
    name: String,
    in_characteristic: Option<CharacteristicFunction>,
    out_characteristic: Option<CharacteristicFunction>,
    in_fifo_depth: Option<FifoDepth>,
    out_fifo_depth: Option<FifoDepth>,
}

impl Stage {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// split a combined characteristic of `2 * 2 * period` entries: the first
    /// half describes the input side, the second half the output side.
    pub fn from_io_characteristic(name: &str, period: Cycle, io: &[usize]) -> Result<Self, Error> {
        if period == 0 {
            return Err(Error::InvalidPeriod(period));
        }
        if io.len() != 4 * period {
            return Err(Error::InvalidCharacteristicLength {
                expected: 4 * period,
                actual: io.len(),
            });
        }
        let (input, output) = io.split_at(2 * period);
        Ok(Self::new(name)
            .with_characteristic(
                Direction::Incoming,
                CharacteristicFunction::new(period, input.to_vec())?,
            )
            .with_characteristic(
                Direction::Outgoing,
                CharacteristicFunction::new(period, output.to_vec())?,
            ))
    }

    pub fn with_characteristic(mut self, side: Direction, chrc: CharacteristicFunction) -> Self {
        self.set_characteristic(side, chrc);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn characteristic(&self, side: Direction) -> Option<&CharacteristicFunction> {
        match side {
            Direction::Incoming => self.in_characteristic.as_ref(),
            Direction::Outgoing => self.out_characteristic.as_ref(),
        }
    }

    /// replace the measured characteristic for one side
    pub fn set_characteristic(&mut self, side: Direction, chrc: CharacteristicFunction) {
        match side {
            Direction::Incoming => self.in_characteristic = Some(chrc),
            Direction::Outgoing => self.out_characteristic = Some(chrc),
        }
    }

    pub fn fifo_depth(&self, side: Direction) -> Option<FifoDepth> {
        match side {
            Direction::Incoming => self.in_fifo_depth,
            Direction::Outgoing => self.out_fifo_depth,
        }
    }

    pub(crate) fn set_fifo_depth(&mut self, side: Direction, depth: FifoDepth) {
        match side {
            Direction::Incoming => self.in_fifo_depth = Some(depth),
            Direction::Outgoing => self.out_fifo_depth = Some(depth),
        }
    }
}
