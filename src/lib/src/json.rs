//! JSON interchange format.
//!
//! ```json
//! {
//!     "version": 2,
//!     "variables": [
//!         {
//!             "name": "PK",
//!             "data": "a1a2...",
//!             "guid": "8be4df61-93ca-11d2-aa0d-00e098032b8c",
//!             "attr": 39,
//!             "timestamp": "e8070a...",
//!             "digest": "5a5a..."
//!         }
//!     ]
//! }
//! ```
//!
//! Binary fields are lowercase hex. `timestamp` and `digest` are omitted
//! when absent. Documents from version 1 (a bare array of variables) are
//! still accepted.

use crate::error::*;
use crate::varstore::*;

use ct_codecs::{Decoder, Encoder, Hex};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// The newest document version this implementation reads and the version
/// it writes.
pub const CURRENT_VERSION: u64 = 2;

#[derive(Debug, Serialize, Deserialize)]
struct JsonVar {
    name: String,
    data: String,
    guid: String,
    attr: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    digest: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonStore {
    #[serde(default)]
    version: Option<u64>,
    #[serde(default)]
    variables: Vec<JsonVar>,
}

fn to_hex(bytes: &[u8]) -> Result<String, UVError> {
    Hex::encode_to_string(bytes).map_err(|e| UVError::InvalidHex(format!("{e:?}")))
}

/// Spaces are tolerated so that space separated byte dumps are accepted.
fn from_hex(field: &str, s: &str) -> Result<Vec<u8>, UVError> {
    Hex::decode_to_vec(s, Some(b" "))
        .map_err(|_| UVError::InvalidHex(format!("{field}: \"{s}\"")))
}

impl JsonVar {
    fn from_var(var: &Variable) -> Result<Self, UVError> {
        Ok(JsonVar {
            name: var.name.clone(),
            data: to_hex(&var.data)?,
            guid: var.guid.to_string(),
            attr: var.attr,
            timestamp: var.timestamp.as_ref().map(|t| to_hex(t)).transpose()?,
            digest: var.digest.as_deref().map(to_hex).transpose()?,
        })
    }

    fn into_var(self) -> Result<Variable, UVError> {
        let guid = self.guid.parse()?;
        let data = from_hex("data", &self.data)?;
        let mut var = Variable::new(self.name, guid, self.attr, data);
        if let Some(timestamp) = &self.timestamp {
            let raw = from_hex("timestamp", timestamp)?;
            var.timestamp = Some(raw.as_slice().try_into().map_err(|_| {
                UVError::InvalidHex(format!("timestamp must be 16 bytes, got {}", raw.len()))
            })?);
        }
        if let Some(digest) = &self.digest {
            var.digest = Some(from_hex("digest", digest)?);
        }
        Ok(var)
    }
}

/// Decode a JSON document.
pub fn decode(data: &[u8]) -> Result<VarStore, UVError> {
    // A bare array is the version 1 layout.
    let document: serde_json::Value = serde_json::from_slice(data)?;
    let (version, variables) = if document.is_array() {
        (1, serde_json::from_value::<Vec<JsonVar>>(document)?)
    } else {
        let store: JsonStore = serde_json::from_value(document)?;
        (store.version.unwrap_or(CURRENT_VERSION), store.variables)
    };
    if version > CURRENT_VERSION {
        return Err(UVError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }
    let vars = variables
        .into_iter()
        .map(JsonVar::into_var)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VarStore::from(vars))
}

/// Encode a store as a pretty-printed JSON document, newline terminated.
pub fn encode(store: &VarStore) -> Result<Vec<u8>, UVError> {
    let document = JsonStore {
        version: Some(CURRENT_VERSION),
        variables: store
            .vars
            .iter()
            .map(JsonVar::from_var)
            .collect::<Result<Vec<_>, _>>()?,
    };
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    out.push(b'\n');
    Ok(out)
}
