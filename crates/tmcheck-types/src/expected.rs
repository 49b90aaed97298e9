use crate::config::reason_of;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive numeric bounds for one measured parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Declared acceptable range per parameter, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeSpec {
    entries: Vec<(String, Bounds)>,
}

impl RangeSpec {
    /// Load a range expectation source. `.yaml` and `.yml` files are read
    /// as YAML, anything else as JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| Error::Config {
            path: Some(path.to_path_buf()),
            reason: format!("cannot read file: {}", err),
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let spec = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };
        spec.map_err(|err| err.at_path(path))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn insert(&mut self, parameter: &str, bounds: Bounds) -> Result<()> {
        let name = parameter.trim();
        if name.is_empty() {
            return Ok(());
        }
        if bounds.min > bounds.max {
            return Err(Error::config(format!(
                "range for `{}` has min {} greater than max {}",
                name, bounds.min, bounds.max
            )));
        }
        if self.get(name).is_some() {
            return Err(Error::config(format!("duplicate range for `{}`", name)));
        }
        self.entries.push((name.to_string(), bounds));
        Ok(())
    }

    pub fn get(&self, parameter: &str) -> Option<Bounds> {
        self.entries
            .iter()
            .find(|(name, _)| name == parameter)
            .map(|(_, bounds)| *bounds)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Bounds)> {
        self.entries.iter().map(|(name, bounds)| (name.as_str(), *bounds))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for RangeSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error as _, MapAccess, Visitor};
        use std::fmt;

        struct RangeSpecVisitor;

        impl<'de> Visitor<'de> for RangeSpecVisitor {
            type Value = RangeSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping parameter names to {min, max}")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut spec = RangeSpec::default();
                while let Some(name) = map.next_key::<String>()? {
                    let bounds: Bounds = map.next_value()?;
                    spec.insert(&name, bounds)
                        .map_err(|err| M::Error::custom(reason_of(err)))?;
                }
                Ok(spec)
            }
        }

        deserializer.deserialize_map(RangeSpecVisitor)
    }
}
