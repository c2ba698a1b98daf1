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

//! phase alignment of producer and consumer characteristics
//!
//! algorithm overview:
//!
//! index `t` of an accumulated characteristic is the number of elements
//! that have flowed by cycle `t`. Reading the producer's schedule `shift`
//! cycles ahead of the consumer's, the consumer never starves if
//!
//! ```text
//! prod[i + shift] >= cons[i]    for all i in [0, period - shift)
//! ```
//!
//! The smallest such shift is the minimal latency between producer and
//! consumer start. During the first `shift` cycles the producer runs ahead
//! of the consumer; the largest lead over that window,
//!
//! ```text
//! max over i in [0, shift) of prod[i + shift] - cons[i]
//! ```
//!
//! is the smallest FIFO that never overflows under that shift.
//!
//! The scan is quadratic in the period, which is bounded by the pipeline
//! latency.

use crate::specs::{CharacteristicFunction, FifoDepth};
use crate::{Cycle, Error};

/// The accepted phase shift of an edge and the FIFO depth it requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub shift: Cycle,
    pub depth: FifoDepth,
}

fn is_stall_free(period: Cycle, shift: Cycle, prod: &[usize], cons: &[usize]) -> bool {
    (0..period - shift).all(|i| prod[i + shift] >= cons[i])
}

/// find the minimal phase shift and FIFO depth for one edge
///
/// `prod` is the producer's output characteristic and `cons` the consumer's
/// input characteristic, both `2 * period` entries long; only the first
/// period of `cons` is read.
pub fn solve(period: Cycle, prod: &[usize], cons: &[usize]) -> Result<Alignment, Error> {
    if period == 0 {
        return Err(Error::InvalidPeriod(period));
    }
    let expected = period
        .checked_mul(2)
        .ok_or(Error::InvalidPeriod(period))?;
    for chrc in [prod, cons] {
        if chrc.len() != expected {
            return Err(Error::InvalidCharacteristicLength {
                expected,
                actual: chrc.len(),
            });
        }
    }

    let accepted: Option<Cycle> = (0..period).find(|&shift| {
        let ok = is_stall_free(period, shift, prod, cons);
        if !ok {
            log::trace!("phase shift {} starves the consumer", shift);
        }
        ok
    });
    let shift = accepted.ok_or(Error::InfeasibleSchedule { period })?;

    let depth = (0..shift)
        .map(|i| prod[i + shift].saturating_sub(cons[i]))
        .max()
        .unwrap_or(0);
    Ok(Alignment {
        shift,
        depth: FifoDepth(depth),
    })
}

/// align the output characteristic of a producer with the input
/// characteristic of its consumer
pub fn align(
    producer: &CharacteristicFunction,
    consumer: &CharacteristicFunction,
) -> Result<Alignment, Error> {
    if producer.period() != consumer.period() {
        return Err(Error::PeriodMismatch {
            producer: producer.period(),
            consumer: consumer.period(),
        });
    }
    solve(
        producer.period(),
        producer.accumulated(),
        consumer.accumulated(),
    )
}
