use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdmxError {
    #[error("structure {structure} declares {kind} {id} more than once")]
    DuplicateComponent {
        structure: String,
        kind: crate::ComponentKind,
        id: String,
    },
    #[error("dataset for structure {structure} repeats series key {key}")]
    DuplicateSeriesKey { structure: String, key: String },
}

pub type Result<T> = std::result::Result<T, SdmxError>;
