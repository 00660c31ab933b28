//! Fixture-backed client for working without network access.
//!
//! Loads recorded API responses from JSON files and serves them as if they
//! were live responses, decoding them exactly like [`CarQueryClient`] does.
//!
//! [`CarQueryClient`]: crate::client::CarQueryClient

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::envelope::{ResponseScope, decode_envelope, payload_into, payload_into_list};
use crate::error::CarQueryError;
use crate::params::{Command, QueryParams};
use crate::types::{Make, ModelName, Record, YearRange};

/// Client that serves recorded responses from disk.
///
/// Filters are ignored: each command always answers with its one fixture.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    /// Raw response bodies, keyed by command.
    bodies: Arc<HashMap<Command, String>>,
}

impl FixtureClient {
    /// Load fixtures from a directory.
    ///
    /// Expects files named after the command (e.g. `getYears.json`,
    /// `getTrims.json`). Other files are skipped. Each file must contain
    /// valid JSON; whether it is a success or an error response is up to the
    /// recording.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, CarQueryError> {
        let data_dir = data_dir.as_ref();
        let mut bodies = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| CarQueryError::Fixture {
            message: format!("failed to read fixture directory {}: {e}", data_dir.display()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CarQueryError::Fixture {
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(command) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(Command::from_name)
            else {
                debug!(path = %path.display(), "skipping file that names no command");
                continue;
            };

            let body = std::fs::read_to_string(&path).map_err(|e| CarQueryError::Fixture {
                message: format!("failed to read {}: {e}", path.display()),
            })?;

            serde_json::from_str::<Value>(&body).map_err(|e| CarQueryError::Fixture {
                message: format!("failed to parse {}: {e}", path.display()),
            })?;

            bodies.insert(command, body);
        }

        if bodies.is_empty() {
            return Err(CarQueryError::Fixture {
                message: format!("no fixture files found in {}", data_dir.display()),
            });
        }

        Ok(Self {
            bodies: Arc::new(bodies),
        })
    }

    /// Commands that have a fixture.
    pub fn available_commands(&self) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|c| self.bodies.contains_key(c))
            .collect()
    }

    /// Decode the fixture for `command` according to `scope`.
    ///
    /// Mimics `CarQueryClient::query`, with the command standing in for the URL.
    pub fn query(&self, command: Command, scope: ResponseScope<'_>) -> Result<Value, CarQueryError> {
        let body = self
            .bodies
            .get(&command)
            .ok_or_else(|| CarQueryError::Fixture {
                message: format!(
                    "no fixture for {command}. Available: {:?}",
                    self.available_commands()
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                ),
            })?;

        decode_envelope(body, scope)
    }

    fn run(&self, command: Command, _params: QueryParams) -> Result<Value, CarQueryError> {
        self.query(command, ResponseScope::for_command(command))
    }

    /// Recorded `getYears` range.
    pub async fn years(&self) -> Result<YearRange, CarQueryError> {
        payload_into(self.run(Command::GetYears, QueryParams::new())?)
    }

    /// Recorded `getMakes` list. Mimics `CarQueryClient::makes`; filters are ignored.
    pub async fn makes(&self, params: impl Into<QueryParams>) -> Result<Vec<Make>, CarQueryError> {
        payload_into_list(self.run(Command::GetMakes, params.into())?)
    }

    /// Recorded `getModels` list. Mimics `CarQueryClient::models`; filters are ignored.
    pub async fn models(
        &self,
        params: impl Into<QueryParams>,
    ) -> Result<Vec<ModelName>, CarQueryError> {
        payload_into_list(self.run(Command::GetModels, params.into())?)
    }

    /// Recorded `getTrims` list. Mimics `CarQueryClient::trims`; filters are ignored.
    pub async fn trims(&self, params: impl Into<QueryParams>) -> Result<Vec<Record>, CarQueryError> {
        payload_into_list(self.run(Command::GetTrims, params.into())?)
    }

    /// Recorded `getModel` record. Mimics `CarQueryClient::model`; filters are ignored.
    pub async fn model(&self, params: impl Into<QueryParams>) -> Result<Record, CarQueryError> {
        payload_into(self.run(Command::GetModel, params.into())?)
    }
}
