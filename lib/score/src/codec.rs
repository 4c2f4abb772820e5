use std::fmt;
use std::io;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ScoreResult;
use crate::literal::{
    exact_integer, ScoreLiteral, SpecialScore, INFINITY_LITERAL, NAN_LITERAL, NEG_INFINITY_LITERAL,
};
use crate::types::Score;

impl Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ScoreLiteral::of(*self) {
            ScoreLiteral::Special(special) => serializer.serialize_str(special.literal()),
            ScoreLiteral::Number(number) => match exact_integer(number) {
                Some(integer) => serializer.serialize_i64(integer),
                None => serializer.serialize_f64(number),
            },
        }
    }
}

struct ScoreVisitor;

impl<'de> Visitor<'de> for ScoreVisitor {
    type Value = Score;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "a number or one of the strings {INFINITY_LITERAL:?}, {NEG_INFINITY_LITERAL:?}, {NAN_LITERAL:?}"
        )
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Score::from(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Score::from(value as f64))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Score::from(value as f64))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match SpecialScore::from_literal(value) {
            Some(special) => Ok(Score::from(special.value())),
            // Report what parsing the value as a plain number says about it
            None => Err(E::custom(format!(
                "{value:?} could not be decoded as a score: {}",
                E::invalid_type(Unexpected::Str(value), &"f64"),
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ScoreVisitor)
    }
}

/// Encodes a bare score as JSON.
pub fn to_string(score: Score) -> String {
    match ScoreLiteral::of(score) {
        ScoreLiteral::Special(special) => format!("\"{}\"", special.literal()),
        ScoreLiteral::Number(_) => score.to_string(),
    }
}

pub fn to_vec(score: Score) -> Vec<u8> {
    to_string(score).into_bytes()
}

pub fn to_writer<W: io::Write>(mut writer: W, score: Score) -> io::Result<()> {
    writer.write_all(to_string(score).as_bytes())
}

/// Decodes a JSON document holding a single score.
///
/// Unlike going through `serde_json::from_slice::<Score>`, a failure always
/// carries the error of parsing the input as a plain number.
pub fn from_slice(bytes: &[u8]) -> ScoreResult<Score> {
    ScoreLiteral::from_json(bytes).map(ScoreLiteral::score)
}

pub fn from_str(json: &str) -> ScoreResult<Score> {
    from_slice(json.as_bytes())
}
