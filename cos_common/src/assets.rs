//! Display names for chain asset identifiers.
//!
//! The table is built once at start-up and shared read-only (usually behind an `Arc`) by every notification task.
use std::{collections::HashMap, str::FromStr};

use log::debug;
use thiserror::Error;

use crate::helpers::parse_key_value_list;

pub const NEO_ASSET_ID: &str = "0xc56f33fc6ecfcd0c225c4ab356fee59390af8560be0e930faebe74a6daff7c9b";
pub const GAS_ASSET_ID: &str = "0x602c79718b16e442de58778e148d0b1084e3b2dffd5de6b7b16cee7969282de7";
pub const UNKNOWN_ASSET_NAME: &str = "unknown asset";

#[derive(Debug, Clone, Error)]
#[error("Invalid asset name entry '{0}'. Expected <asset id>=<display name>")]
pub struct AssetNameParseError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNames {
    names: HashMap<String, String>,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self::new([(NEO_ASSET_ID, "NEO"), (GAS_ASSET_ID, "NEO GAS")])
    }
}

impl AssetNames {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let names = entries.into_iter().map(|(id, name)| (normalize(id.into()), name.into())).collect();
        Self { names }
    }

    /// Adds the given entries to the table, replacing the names of ids that are already present.
    pub fn extend<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (id, name) in entries {
            let id = normalize(id.into());
            let name = name.into();
            debug!("🪙️ Asset {id} will be displayed as '{name}'");
            self.names.insert(id, name);
        }
        self
    }

    /// The display name for the asset id, or [`UNKNOWN_ASSET_NAME`] if the id is not in the table.
    pub fn name_for(&self, asset_id: &str) -> &str {
        self.names.get(&normalize(asset_id.to_string())).map(String::as_str).unwrap_or(UNKNOWN_ASSET_NAME)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses `id=name,id=name` into a table that starts from the default entries.
impl FromStr for AssetNames {
    type Err = AssetNameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let entries = parse_key_value_list(s).map_err(AssetNameParseError)?;
        Ok(Self::default().extend(entries))
    }
}

fn normalize(id: String) -> String {
    id.trim().to_ascii_lowercase()
}
