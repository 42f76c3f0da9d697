use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("no placement candidates given")]
    NoCandidates,
    #[error("anchor element `{0}` not found")]
    UnknownAnchor(String),
    #[error("node `{0}` not found")]
    UnknownNode(String),
    #[error("invalid corner code `{0}` (expected e.g. \"TL\", \"BR\", \"TM\")")]
    InvalidCorner(String),
    #[error("unknown position name `{0}`")]
    UnknownPosition(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}
