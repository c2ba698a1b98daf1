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

use petgraph::prelude::*;
use std::fmt;

use crate::Cycle;

#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// a characteristic function needs a period of at least one cycle
    InvalidPeriod(Cycle),
    InvalidCharacteristicLength {
        expected: usize,
        actual: usize,
    },
    /// the accumulated count drops at the given index
    NonMonotonicCharacteristic(usize),
    MissingCharacteristic(NodeIndex, Direction),
    InvalidStage(NodeIndex),
    PeriodMismatch {
        producer: Cycle,
        consumer: Cycle,
    },
    /// no phase shift within one period avoids starving the consumer
    InfeasibleSchedule {
        period: Cycle,
    },
    Edge(EdgeIndex, Box<Error>),
}

impl Error {
    /// true for errors caused by malformed or inconsistent input data, as
    /// opposed to a well-formed but unschedulable edge.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::InfeasibleSchedule { .. } => false,
            Self::Edge(_, inner) => inner.is_configuration(),
            _ => true,
        }
    }
}

fn side_name(side: &Direction) -> &'static str {
    match side {
        Direction::Incoming => "input",
        Direction::Outgoing => "output",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidPeriod(p) => write!(f, "ERROR: Invalid characteristic period {}", p),
            Self::InvalidCharacteristicLength { expected, actual } => write!(
                f,
                "ERROR: Accumulated characteristic has {} entries, expected {}",
                actual, expected
            ),
            Self::NonMonotonicCharacteristic(i) => write!(
                f,
                "ERROR: Accumulated characteristic decreases at index {}",
                i
            ),
            Self::MissingCharacteristic(n, side) => write!(
                f,
                "ERROR: Stage {} has no {} characteristic",
                n.index(),
                side_name(side)
            ),
            Self::InvalidStage(n) => write!(f, "ERROR: Invalid stage {}", n.index()),
            Self::PeriodMismatch { producer, consumer } => write!(
                f,
                "ERROR: Producer period {} does not match consumer period {}",
                producer, consumer
            ),
            Self::InfeasibleSchedule { period } => write!(
                f,
                "ERROR: No phase shift within period {} avoids stalling the consumer",
                period
            ),
            Self::Edge(e, inner) => write!(f, "{} (edge {})", inner, e.index()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Edge(_, inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::InvalidPeriod(0).is_configuration());
        assert!(Error::PeriodMismatch {
            producer: 4,
            consumer: 8
        }
        .is_configuration());
        assert!(!Error::InfeasibleSchedule { period: 4 }.is_configuration());
        let wrapped = Error::Edge(
            EdgeIndex::new(3),
            Box::new(Error::InfeasibleSchedule { period: 4 }),
        );
        assert!(!wrapped.is_configuration());
    }

    #[test]
    fn test_edge_source() {
        use std::error::Error as _;
        let wrapped = Error::Edge(EdgeIndex::new(3), Box::new(Error::InvalidPeriod(0)));
        assert_eq!(
            wrapped.to_string(),
            "ERROR: Invalid characteristic period 0 (edge 3)"
        );
        assert_eq!(
            wrapped.source().map(|e| e.to_string()),
            Some(Error::InvalidPeriod(0).to_string())
        );
        assert!(Error::InvalidPeriod(0).source().is_none());
    }
}
