mod assets;
pub mod helpers;
mod secret;

pub use assets::{AssetNameParseError, AssetNames, GAS_ASSET_ID, NEO_ASSET_ID, UNKNOWN_ASSET_NAME};
pub use secret::Secret;
