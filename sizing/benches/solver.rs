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

use bencher::Bencher;
use bencher::{benchmark_group, benchmark_main};

use sizing::*;

const PERIOD: usize = 256;

// the producer emits a whole period worth of data in its last cycle, which
// forces the scan through every candidate shift
fn bursty(bench: &mut Bencher) {
    let prod = (0..2 * PERIOD)
        .map(|t| (t + 1) / PERIOD * PERIOD)
        .collect::<Vec<_>>();
    let cons = (0..2 * PERIOD).map(|t| t + 1).collect::<Vec<_>>();
    bench.iter(|| solve(PERIOD, &prod, &cons).expect("Failed to size"));
}

fn pipeline(bench: &mut Bencher) {
    const STAGES: usize = 64;
    let transfers = (0..PERIOD).map(|t| t % 2).collect::<Vec<_>>();
    let mut graph = DataflowGraph::new();
    let mut previous = graph.add_boundary("global_in");
    for i in 0..STAGES {
        let chrc = CharacteristicFunction::from_transfers(PERIOD, &transfers)
            .expect("Invalid characteristic");
        let stage = graph.add_stage(
            Stage::new(&format!("s{}", i))
                .with_characteristic(Direction::Incoming, chrc.clone())
                .with_characteristic(Direction::Outgoing, chrc),
        );
        graph.connect(previous, stage, &format!("t{}", i));
        previous = stage;
    }
    let config = SizingConfiguration {
        parallel: true,
        ..Default::default()
    };
    bench.iter(|| size_fifos(&mut graph, &config).expect("Failed to size"));
}

benchmark_group!(benches, bursty, pipeline);
benchmark_main!(benches);
