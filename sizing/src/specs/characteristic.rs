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

//! periodic characteristic functions
//!
//! A characteristic function describes the steady-state IO behavior of one
//! side of a stage: entry `t` of the accumulated characteristic is the
//! number of elements transferred by cycle `t`. The sequence spans two
//! periods, so that a lookup at `i + shift`, with both `i` and `shift` in
//! `[0, period)`, always stays within the stored data.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Cycle, Error};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCharacteristic", into = "RawCharacteristic")]
pub struct CharacteristicFunction {
    period: Cycle,
    accumulated: Vec<usize>,
}

/// serialized form; validated on the way in.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawCharacteristic {
    period: Cycle,
    accumulated_characteristic: Vec<usize>,
}

impl TryFrom<RawCharacteristic> for CharacteristicFunction {
    type Error = Error;

    fn try_from(raw: RawCharacteristic) -> Result<Self, Self::Error> {
        Self::new(raw.period, raw.accumulated_characteristic)
    }
}

impl From<CharacteristicFunction> for RawCharacteristic {
    fn from(chrc: CharacteristicFunction) -> Self {
        Self {
            period: chrc.period,
            accumulated_characteristic: chrc.accumulated,
        }
    }
}

impl CharacteristicFunction {
    pub fn new(period: Cycle, accumulated: Vec<usize>) -> Result<Self, Error> {
        if period == 0 {
            return Err(Error::InvalidPeriod(period));
        }
        if accumulated.len() != 2 * period {
            return Err(Error::InvalidCharacteristicLength {
                expected: 2 * period,
                actual: accumulated.len(),
            });
        }
        if let Some((i, _)) = accumulated
            .iter()
            .tuple_windows::<(_, _)>()
            .find_position(|(prev, next)| next < prev)
        {
            return Err(Error::NonMonotonicCharacteristic(i + 1));
        }
        Ok(Self {
            period,
            accumulated,
        })
    }

    /// build the accumulated characteristic from a per-cycle transfer trace
    ///
    /// `transfers[t]` is the number of elements moved in cycle `t`. A trace
    /// covering a single period is assumed to repeat for the second one.
    pub fn from_transfers(period: Cycle, transfers: &[usize]) -> Result<Self, Error> {
        if period == 0 {
            return Err(Error::InvalidPeriod(period));
        }
        let trace: Vec<usize> = if transfers.len() == period {
            transfers.iter().chain(transfers.iter()).copied().collect()
        } else {
            transfers.to_vec()
        };
        let accumulated = trace
            .iter()
            .scan(0, |total, n| {
                *total += n;
                Some(*total)
            })
            .collect();
        Self::new(period, accumulated)
    }

    pub fn period(&self) -> Cycle {
        self.period
    }

    pub fn accumulated(&self) -> &[usize] {
        &self.accumulated
    }

    /// number of elements transferred over one full period in steady state
    pub fn transferred_per_period(&self) -> usize {
        self.accumulated[self.period] - self.accumulated[0]
    }
}
