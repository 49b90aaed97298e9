use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// One telemetry message identifier and the parameters it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmEntry {
    pub id: String,
    pub parameters: Vec<String>,
}

/// Mapping from TM identifier to the ordered list of parameters it carries.
///
/// Entries keep the order of the source document so that reports are
/// deterministic. Parameter names are trimmed; blank names are dropped and
/// repeated names within one identifier collapse into the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TelemetryConfig {
    entries: Vec<TmEntry>,
}

impl TelemetryConfig {
    /// Load a telemetry config from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| Error::Config {
            path: Some(path.to_path_buf()),
            reason: format!("cannot read file: {}", err),
        })?;
        Self::from_json_str(&content).map_err(|err| err.at_path(path))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    fn push(&mut self, id: String, raw_parameters: Vec<String>) -> Result<()> {
        if self.entries.iter().any(|entry| entry.id == id) {
            return Err(Error::config(format!("duplicate TM id `{}`", id)));
        }

        let mut parameters: Vec<String> = Vec::with_capacity(raw_parameters.len());
        for raw in raw_parameters {
            let name = raw.trim();
            if name.is_empty() || parameters.iter().any(|p| p == name) {
                continue;
            }
            parameters.push(name.to_string());
        }

        self.entries.push(TmEntry { id, parameters });
        Ok(())
    }

    pub fn entries(&self) -> &[TmEntry] {
        &self.entries
    }

    /// Identifier that carries `parameter`. When several identifiers list
    /// it, the last one declared wins.
    pub fn identifier_for(&self, parameter: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.parameters.iter().any(|p| p == parameter))
            .map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for TelemetryConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error as _, MapAccess, Visitor};
        use std::fmt;

        struct TelemetryConfigVisitor;

        impl<'de> Visitor<'de> for TelemetryConfigVisitor {
            type Value = TelemetryConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping TM ids to arrays of parameter names")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut config = TelemetryConfig::default();
                while let Some(id) = map.next_key::<String>()? {
                    let parameters: Vec<String> = map.next_value()?;
                    config
                        .push(id, parameters)
                        .map_err(|err| M::Error::custom(reason_of(err)))?;
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(TelemetryConfigVisitor)
    }
}

pub(crate) fn reason_of(err: Error) -> String {
    match err {
        Error::Config { reason, .. } => reason,
        other => other.to_string(),
    }
}
