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

//! Sizes the FIFOs of a small convolutional pipeline end to end.
//!
//! Each stage reads one element every `stride` cycles at the start of its
//! period and, after its latency, writes one element per cycle. The characteristics are
//! built from those per-cycle transfer traces, the way a cycle-accurate
//! measurement reports them.
//!
//! An optional argument names a YAML sizing configuration.
use sizing::CharacteristicStore;
use sizing::{
    solve, size_fifos, CharacteristicFunction, DataflowGraph, Direction, SizingConfiguration,
    SizingReport, Stage,
};

const PERIOD: usize = 32;

struct StageModel {
    name: &'static str,
    consumed: usize,
    stride: usize,
    latency: usize,
    produced: usize,
}

const PIPELINE: [StageModel; 5] = [
    StageModel {
        name: "thresholding",
        consumed: 16,
        stride: 1,
        latency: 2,
        produced: 16,
    },
    StageModel {
        name: "sliding_window",
        consumed: 16,
        stride: 1,
        latency: 6,
        produced: 16,
    },
    StageModel {
        name: "mvau",
        consumed: 16,
        stride: 1,
        latency: 14,
        produced: 8,
    },
    StageModel {
        name: "pool",
        consumed: 8,
        stride: 2,
        latency: 20,
        produced: 4,
    },
    StageModel {
        name: "label_select",
        consumed: 4,
        stride: 1,
        latency: 28,
        produced: 1,
    },
];

fn trace(first_cycle: usize, count: usize, stride: usize) -> Vec<usize> {
    (0..PERIOD)
        .map(|t| {
            let active = t >= first_cycle
                && t < first_cycle + count * stride
                && (t - first_cycle) % stride == 0;
            active as usize
        })
        .collect()
}

fn build_pipeline() -> anyhow::Result<DataflowGraph> {
    let mut graph = DataflowGraph::new();
    let mut previous = graph.add_boundary("global_in");
    for (i, model) in PIPELINE.iter().enumerate() {
        let consumed = trace(0, model.consumed, model.stride);
        let produced = trace(model.latency, model.produced, 1);
        let stage = graph.add_stage(
            Stage::new(model.name)
                .with_characteristic(
                    Direction::Incoming,
                    CharacteristicFunction::from_transfers(PERIOD, &consumed)?,
                )
                .with_characteristic(
                    Direction::Outgoing,
                    CharacteristicFunction::from_transfers(PERIOD, &produced)?,
                ),
        );
        graph.connect(previous, stage, &format!("act_{}", i));
        previous = stage;
    }
    let output = graph.add_boundary("global_out");
    graph.connect(previous, output, &format!("act_{}", PIPELINE.len()));
    Ok(graph)
}

// re-solve every sized edge from the stored characteristics and check the
// consumer never starves under the accepted shift
fn verify(graph: &DataflowGraph, report: &SizingReport) -> anyhow::Result<()> {
    for edge in &report.sized {
        let prod = graph.characteristic(edge.pair.producer, Direction::Outgoing)?;
        let cons = graph.characteristic(edge.pair.consumer, Direction::Incoming)?;
        let shift = edge.alignment.shift;
        anyhow::ensure!(
            (0..PERIOD - shift).all(|i| prod[i + shift] >= cons[i]),
            "tensor {} stalls under shift {}",
            edge.tensor,
            shift
        );
        anyhow::ensure!(
            solve(PERIOD, prod, cons)? == edge.alignment,
            "tensor {} is not idempotent",
            edge.tensor
        );
        anyhow::ensure!(
            graph.depth(edge.pair.producer, Direction::Outgoing)?
                == graph.depth(edge.pair.consumer, Direction::Incoming)?,
            "tensor {} has inconsistent depths",
            edge.tensor
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = match std::env::args().nth(1) {
        Some(path) => SizingConfiguration::from_file(&path)?,
        None => SizingConfiguration::default(),
    };
    log::info!("Sizing with {:?}", config);

    let mut graph = build_pipeline()?;
    let report = size_fifos(&mut graph, &config)?;
    for edge in &report.sized {
        log::info!(
            "{}: shift {} depth {}",
            edge.tensor,
            edge.alignment.shift,
            edge.alignment.depth
        );
    }
    log::debug!("{}", graph);

    anyhow::ensure!(report.failed.is_empty(), "{} edges failed", report.failed.len());
    anyhow::ensure!(report.boundary_edges == 2, "expected two boundary tensors");
    verify(&graph, &report)?;

    let again = size_fifos(&mut graph, &config)?;
    anyhow::ensure!(again == report, "sizing is not idempotent");
    log::info!("Total FIFO depth {}", report.total_depth());
    Ok(())
}
