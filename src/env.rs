use std::time::Duration;

use envy::Error::MissingValue;
use serde::Deserialize;

use crate::clients::beacon::Config;

/// Client settings read from the process environment.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    #[serde(default = "default_beacon_node_endpoint")]
    pub beacon_node_endpoint: String,
    /// Per-request deadline, unbounded when unset
    pub beacon_request_timeout_secs: Option<u64>,
}

fn default_beacon_node_endpoint() -> String {
    "http://localhost:5052".into()
}

impl Environment {
    pub fn from_env() -> Result<Self, envy::Error> {
        Self::validate(envy::from_env::<Environment>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::validate(envy::from_iter::<_, Environment>(vars)?)
    }

    fn validate(config: Self) -> Result<Self, envy::Error> {
        if config.beacon_node_endpoint.is_empty() {
            return Err(MissingValue("BEACON_NODE_ENDPOINT"));
        }

        Ok(config)
    }
}

impl From<&Environment> for Config {
    fn from(env: &Environment) -> Self {
        Config {
            base_url: env.beacon_node_endpoint.clone(),
            timeout: env.beacon_request_timeout_secs.map(Duration::from_secs),
        }
    }
}
