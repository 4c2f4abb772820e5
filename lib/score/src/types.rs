use std::borrow::Cow;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Deref, DerefMut, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_traits::Zero;
use ordered_float::OrderedFloat;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Metadata, Schema, SchemaObject, SubschemaValidation};
use schemars::JsonSchema;
use serde_json::Value;

use crate::errors::UnrepresentableScoreLiteral;
use crate::literal::{json_number, ScoreLiteral, SpecialScore};

/// Relevance score of a search hit.
///
/// Behaves like a plain `f64`, including IEEE comparison semantics, but is
/// (de)serialized so that infinite scores survive a trip through JSON.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Score(pub(crate) f64);

impl Score {
    pub const ZERO: Self = Score(0.0);
    pub const INFINITY: Self = Score(f64::INFINITY);
    pub const NEG_INFINITY: Self = Score(f64::NEG_INFINITY);
    pub const NAN: Self = Score(f64::NAN);

    pub const fn new(value: f64) -> Self {
        Score(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// True for both signs of zero.
    ///
    /// Intended for `#[serde(skip_serializing_if = "Score::is_zero")]`.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Total order over all scores, NaN included. Use it to sort hits.
    pub fn ordered(self) -> OrderedFloat<f64> {
        OrderedFloat(self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ScoreLiteral::of(*self) {
            ScoreLiteral::Special(special) => f.write_str(special.literal()),
            ScoreLiteral::Number(number) => match json_number(number) {
                Some(json) => write!(f, "{json}"),
                None => write!(f, "{number}"),
            },
        }
    }
}

impl FromStr for Score {
    type Err = UnrepresentableScoreLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreLiteral::from_text(s).map(ScoreLiteral::score)
    }
}

impl JsonSchema for Score {
    fn schema_name() -> String {
        "Score".to_string()
    }

    fn schema_id() -> Cow<'static, str> {
        Cow::Borrowed(concat!(module_path!(), "::Score"))
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        let special = SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            enum_values: Some(
                SpecialScore::ALL
                    .iter()
                    .map(|special| Value::from(special.literal()))
                    .collect(),
            ),
            ..Default::default()
        };

        SchemaObject {
            metadata: Some(Box::new(Metadata {
                description: Some(
                    "Relevance score. Non-finite values are written as string tokens".to_string(),
                ),
                ..Default::default()
            })),
            subschemas: Some(Box::new(SubschemaValidation {
                any_of: Some(vec![gen.subschema_for::<f64>(), special.into()]),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score(value)
    }
}

impl From<f32> for Score {
    fn from(value: f32) -> Self {
        Score(f64::from(value))
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl PartialEq<f64> for Score {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl Deref for Score {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Score {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Zero for Score {
    fn zero() -> Self {
        Score::ZERO
    }

    fn is_zero(&self) -> bool {
        Score::is_zero(self)
    }
}

impl Neg for Score {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Score(-self.0)
    }
}

impl Add for Score {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Score(self.0 + other.0)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Score {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Score(self.0 - other.0)
    }
}

impl SubAssign for Score {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul for Score {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Score(self.0 * rhs.0)
    }
}

impl Div for Score {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Score(self.0 / rhs.0)
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Score(iter.fold(0.0, |acc, score| acc + score.0))
    }
}

impl Sum<f64> for Score {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        Score(iter.sum())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;

    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Score::ZERO, "0")]
    #[case(Score(42.195), "42.195")]
    #[case(Score(-3.0), "-3")]
    #[case(Score(-0.0), "-0.0")]
    #[case(Score(1e300), "1e+300")]
    #[case(Score::INFINITY, "Infinity")]
    #[case(Score::NEG_INFINITY, "-Infinity")]
    #[case(Score::NAN, "NaN")]
    fn display(#[case] score: Score, #[case] expected: &str) {
        assert_eq!(score.to_string(), expected);
    }

    #[rstest]
    #[case("0", Score::ZERO)]
    #[case("42.195", Score(42.195))]
    #[case("Infinity", Score::INFINITY)]
    #[case("-Infinity", Score::NEG_INFINITY)]
    #[case("1e-7", Score(1e-7))]
    fn parse(#[case] text: &str, #[case] expected: Score) {
        assert_eq!(text.parse::<Score>().unwrap(), expected);
    }

    #[test]
    fn parse_nan() {
        assert!("NaN".parse::<Score>().unwrap().is_nan());
    }

    #[test]
    fn parse_failure_keeps_number_error() {
        let err = "banana".parse::<Score>().unwrap_err();
        assert_eq!(err.literal, "banana");
        assert!(err.source.is_syntax());
    }

    #[test]
    fn display_parses_back() {
        for value in [0.1, -2.5e-12, 123456789.125, f64::MAX, f64::MIN_POSITIVE] {
            let score = Score(value);
            let parsed: Score = score.to_string().parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn arithmetic_follows_f64() {
        let a = Score(1.5);
        let b = Score::from(0.25f32);

        assert_relative_eq!(*(a + b), 1.75);
        assert_relative_eq!(*(a - b), 1.25);
        assert_relative_eq!(*(a * b), 0.375);
        assert_relative_eq!(*(a / b), 6.0);
        assert_eq!(-a, Score(-1.5));

        let mut acc = Score::ZERO;
        acc += a;
        acc -= b;
        assert_relative_eq!(*acc, 1.25);

        let total: Score = [a, b, Score(2.0)].into_iter().sum();
        assert_relative_eq!(*total, 3.75);

        let total: Score = [0.5, 0.5].into_iter().sum();
        assert_eq!(total, 1.0);

        assert_eq!(Score(1.0) / Score::ZERO, Score::INFINITY);
        assert_eq!(Score(-1.0) / Score::ZERO, Score::NEG_INFINITY);
    }

    #[test]
    fn comparisons_follow_ieee() {
        assert!(Score::INFINITY > Score(f64::MAX));
        assert!(Score::NEG_INFINITY < Score(f64::MIN));
        assert_eq!(Score(0.0), Score(-0.0));
        assert_ne!(Score::NAN, Score::NAN);
        assert_eq!(Score::NAN.partial_cmp(&Score::ZERO), None);
    }

    #[test]
    fn zero_predicate() {
        assert!(Score::ZERO.is_zero());
        assert!(Score(-0.0).is_zero());
        assert!(!Score(f64::MIN_POSITIVE).is_zero());
        assert!(<Score as Zero>::zero().is_zero());
    }

    #[test]
    fn sort_by_ordered_score() {
        let mut scores = vec![
            Score(0.5),
            Score::NEG_INFINITY,
            Score::INFINITY,
            Score(12.0),
            Score(-1.0),
        ];
        scores.sort_by_key(|score| Reverse(score.ordered()));

        assert_eq!(
            scores,
            vec![
                Score::INFINITY,
                Score(12.0),
                Score(0.5),
                Score(-1.0),
                Score::NEG_INFINITY,
            ]
        );
    }

    #[test]
    fn schema_lists_special_literals() {
        let schema = schemars::schema_for!(Score);
        let schema = serde_json::to_value(schema).unwrap();
        let any_of = schema["anyOf"].as_array().unwrap();

        assert_eq!(any_of.len(), 2);
        assert_eq!(any_of[0]["type"], "number");
        assert_eq!(
            any_of[1]["enum"],
            serde_json::json!(["Infinity", "-Infinity", "NaN"])
        );
    }
}
