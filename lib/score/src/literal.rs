//! Wire shapes of a score.
//!
//! A score is either a bare JSON number or, for the values JSON numbers
//! cannot express, one of a few quoted string tokens.

use crate::errors::{ScoreResult, UnrepresentableScoreLiteral};
use crate::types::Score;

pub const INFINITY_LITERAL: &str = "Infinity";
pub const NEG_INFINITY_LITERAL: &str = "-Infinity";
pub const NAN_LITERAL: &str = "NaN";

/// 2^53, every integer below it is exactly representable as `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Score values without a JSON number representation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialScore {
    Infinity,
    NegInfinity,
    NaN,
}

impl SpecialScore {
    pub const ALL: [SpecialScore; 3] = [
        SpecialScore::Infinity,
        SpecialScore::NegInfinity,
        SpecialScore::NaN,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            SpecialScore::Infinity => INFINITY_LITERAL,
            SpecialScore::NegInfinity => NEG_INFINITY_LITERAL,
            SpecialScore::NaN => NAN_LITERAL,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            SpecialScore::Infinity => f64::INFINITY,
            SpecialScore::NegInfinity => f64::NEG_INFINITY,
            SpecialScore::NaN => f64::NAN,
        }
    }

    /// Exact, case-sensitive match against the unescaped string contents
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            INFINITY_LITERAL => Some(SpecialScore::Infinity),
            NEG_INFINITY_LITERAL => Some(SpecialScore::NegInfinity),
            NAN_LITERAL => Some(SpecialScore::NaN),
            _ => None,
        }
    }

    pub fn of(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(SpecialScore::NaN)
        } else if value == f64::INFINITY {
            Some(SpecialScore::Infinity)
        } else if value == f64::NEG_INFINITY {
            Some(SpecialScore::NegInfinity)
        } else {
            None
        }
    }
}

/// Decoded or to-be-encoded form of a score
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScoreLiteral {
    /// Finite value, written as a bare JSON number
    Number(f64),
    /// Written as a quoted string token
    Special(SpecialScore),
}

impl ScoreLiteral {
    pub fn of(score: Score) -> Self {
        match SpecialScore::of(*score) {
            Some(special) => ScoreLiteral::Special(special),
            None => ScoreLiteral::Number(*score),
        }
    }

    pub fn score(self) -> Score {
        match self {
            ScoreLiteral::Number(number) => Score::from(number),
            ScoreLiteral::Special(special) => Score::from(special.value()),
        }
    }

    /// Decodes a JSON document holding a single score.
    ///
    /// The number form is tried first. Only if it fails is the input read as
    /// a JSON string and matched against the special tokens. Whatever goes
    /// wrong afterwards, the number-form failure is what gets reported.
    pub fn from_json(bytes: &[u8]) -> ScoreResult<Self> {
        let number_err = match serde_json::from_slice::<f64>(bytes) {
            Ok(number) => return Ok(ScoreLiteral::Number(number)),
            Err(err) => err,
        };

        let Ok(text) = serde_json::from_slice::<String>(bytes) else {
            return Err(UnrepresentableScoreLiteral::from_bytes(bytes, number_err));
        };

        log::trace!("score is not a JSON number, trying special literal {text:?}");

        match SpecialScore::from_literal(&text) {
            Some(special) => Ok(ScoreLiteral::Special(special)),
            None => Err(UnrepresentableScoreLiteral::from_bytes(bytes, number_err)),
        }
    }

    /// Decodes the unquoted text form, as printed by `Display`
    pub fn from_text(text: &str) -> ScoreResult<Self> {
        let number_err = match serde_json::from_str::<f64>(text) {
            Ok(number) => return Ok(ScoreLiteral::Number(number)),
            Err(err) => err,
        };

        SpecialScore::from_literal(text.trim())
            .map(ScoreLiteral::Special)
            .ok_or_else(|| UnrepresentableScoreLiteral::new(text, number_err))
    }
}

/// Integral values that survive a trip through `i64` are written without a
/// fractional part, so that zero is `0` rather than `0.0`.
///
/// Negative zero is excluded to keep its sign.
pub(crate) fn exact_integer(value: f64) -> Option<i64> {
    if value.fract() != 0.0 || value.abs() >= MAX_EXACT_INTEGER {
        return None;
    }
    if value == 0.0 && value.is_sign_negative() {
        return None;
    }
    Some(value as i64)
}

/// Shortest JSON number text for a finite value
pub(crate) fn json_number(value: f64) -> Option<serde_json::Number> {
    match exact_integer(value) {
        Some(integer) => Some(serde_json::Number::from(integer)),
        None => serde_json::Number::from_f64(value),
    }
}
