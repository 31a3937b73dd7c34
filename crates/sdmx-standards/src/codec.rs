//! Exchange-format codec seam.
//!
//! Parsing and serializing SDMX-ML is done by an external codec; the
//! filter only ever sees [`DataMessage`] values. [`JsonCodec`] moves the
//! already-parsed model in and out of files.

use sdmx_model::DataMessage;

use crate::error::StandardsError;

pub trait MessageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DataMessage, StandardsError>;

    fn encode(&self, message: &DataMessage) -> Result<Vec<u8>, StandardsError>;
}

/// JSON hand-off form of a parsed data message.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pub pretty: bool,
}

impl JsonCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl MessageCodec for JsonCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DataMessage, StandardsError> {
        serde_json::from_slice(bytes).map_err(|source| StandardsError::Decode {
            what: "data message",
            source,
        })
    }

    fn encode(&self, message: &DataMessage) -> Result<Vec<u8>, StandardsError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(message)
        } else {
            serde_json::to_vec(message)
        };
        encoded.map_err(|source| StandardsError::Encode {
            what: "data message",
            source,
        })
    }
}
