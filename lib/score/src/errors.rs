use thiserror::Error;

/// Input is neither a number nor one of the recognized special score tokens.
///
/// `source` is always the failure of the number form, even when the special
/// string form was attempted afterwards.
#[derive(Error, Debug)]
#[error("{literal:?} could not be decoded as a score: {source}")]
pub struct UnrepresentableScoreLiteral {
    pub literal: String,
    pub source: serde_json::Error,
}

impl UnrepresentableScoreLiteral {
    pub fn new(literal: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            literal: literal.into(),
            source,
        }
    }

    pub(crate) fn from_bytes(bytes: &[u8], source: serde_json::Error) -> Self {
        Self::new(String::from_utf8_lossy(bytes), source)
    }
}

pub type ScoreResult<T> = Result<T, UnrepresentableScoreLiteral>;
