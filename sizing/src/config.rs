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

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// what a sizing run does when an edge cannot be sized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// stop at the first failing edge and return its error
    #[default]
    Abort,
    /// log and record the failure, then size the remaining edges
    SkipAndContinue,
}

/// parameters of a sizing run
///
/// constructed programmatically or read from a config file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SizingConfiguration {
    pub failure_policy: FailurePolicy,
    /// solve edges concurrently; depths are still written in edge order
    pub parallel: bool,
}

impl SizingConfiguration {
    pub fn from_file(file_name: &str) -> anyhow::Result<Self> {
        let file = File::open(Path::new(file_name))
            .with_context(|| format!("File {} not found", file_name))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader)
            .with_context(|| format!("Invalid sizing configuration in {}", file_name))
    }

    pub fn from_str(config: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(config).context("Invalid sizing configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_yaml_config() {
        let conf_str = "---
failure_policy: skip_and_continue
parallel: true
";
        let config = SizingConfiguration::from_str(conf_str).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::SkipAndContinue);
        assert!(config.parallel);

        let config = SizingConfiguration::from_str("---\nparallel: true\n").unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::Abort);

        assert!(SizingConfiguration::from_str("failure_policy: retry\n").is_err());
    }

    #[test]
    fn write_yaml_config() {
        let config = SizingConfiguration {
            failure_policy: FailurePolicy::SkipAndContinue,
            parallel: false,
        };
        let text = serde_yaml::to_string(&config).unwrap();
        println!("{}", text);
        assert_eq!(SizingConfiguration::from_str(&text).unwrap(), config);
    }

    #[test]
    fn read_config_file() {
        let path = std::env::temp_dir().join(format!("sizing-config-{}.yaml", std::process::id()));
        let mut file = File::create(&path).unwrap();
        writeln!(file, "failure_policy: abort").unwrap();
        drop(file);
        let config = SizingConfiguration::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config, SizingConfiguration::default());
        std::fs::remove_file(&path).unwrap();

        assert!(SizingConfiguration::from_file("/nonexistent/sizing.yaml").is_err());
    }
}
