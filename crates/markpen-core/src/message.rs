//! Messages crossing the editor/host boundary.
//!
//! The host receives exactly one message kind: a rendered PNG wrapped
//! in a data URL, e.g.
//! { "type": "save-image", "dataUrl": "data:image/png;base64,..." }

use serde::{Deserialize, Serialize};

/// Prefix of a PNG data URL.
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Messages sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    /// Ask the host to persist a rendered image.
    SaveImage {
        #[serde(rename = "dataUrl")]
        data_url: String,
    },
}

impl HostMessage {
    /// Wrap encoded PNG bytes for the host.
    pub fn save_image(png_bytes: &[u8]) -> Self {
        Self::SaveImage {
            data_url: png_data_url(png_bytes),
        }
    }

    /// Serialize for the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Encode PNG bytes as a data URL.
pub fn png_data_url(png_bytes: &[u8]) -> String {
    use base64::{Engine, engine::general_purpose::STANDARD};
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png_bytes))
}

/// Decode a PNG data URL back into bytes.
///
/// Returns `None` for other URL schemes or corrupt base64.
pub fn png_from_data_url(data_url: &str) -> Option<Vec<u8>> {
    use base64::{Engine, engine::general_purpose::STANDARD};
    let encoded = data_url.strip_prefix(PNG_DATA_URL_PREFIX)?;
    STANDARD.decode(encoded).ok()
}
