use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use seclang_lang::{DirectiveKind, Emission, ParserConfig};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

///
/// Optional YAML configuration shared by all commands:
///
/// ```yaml
/// emission: lines
/// zero_arity:
///   - SecAction
///   - SecMarker
/// ```
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinterConfig {
    pub emission: Option<String>,
    pub zero_arity: Vec<String>,
}

impl LinterConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Err(Error::FileNotFoundError(path.to_string()));
        }
        let config: LinterConfig = serde_yaml::from_reader(BufReader::new(File::open(path)?))?;
        debug!("loaded configuration from {}: {:?}", path, config);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// keywords named on the command line are added to the configured ones
    pub fn with_zero_arity<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zero_arity.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_emission(mut self, emission: Emission) -> Self {
        self.emission = Some(
            match emission {
                Emission::Spans => "spans",
                Emission::Lines => "lines",
            }
            .to_string(),
        );
        self
    }

    pub fn parser_config(&self) -> Result<ParserConfig> {
        let emission = match &self.emission {
            Some(emission) => emission.parse::<Emission>()?,
            None => Emission::default(),
        };
        let zero_arity = self
            .zero_arity
            .iter()
            .map(|keyword| keyword.parse::<DirectiveKind>())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ParserConfig::default()
            .with_emission(emission)
            .with_zero_arity(zero_arity))
    }
}
