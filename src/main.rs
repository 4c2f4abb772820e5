mod settings;

use std::cmp::Reverse;

use anyhow::Context;
use clap::{Parser, Subcommand};
use score::{codec, Score};

use crate::settings::{OutputFormat, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Encode, decode and rank search scores")]
struct Args {
    /// Path to an additional configuration file
    #[arg(long, value_name = "PATH")]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JSON encoding of scores given as text, e.g. `42.195` or `-Infinity`
    Encode {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Decode scores given as JSON, e.g. `42.195` or `"-Infinity"`
    Decode {
        #[arg(required = true, allow_hyphen_values = true)]
        json: Vec<String>,
    },
    /// Decode scores given as JSON and print them best first
    Rank {
        #[arg(required = true, allow_hyphen_values = true)]
        json: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = Settings::new(args.config_path).context("Can't read config.")?;

    env_logger::Builder::new()
        .parse_filters(&settings.log_level)
        .parse_default_env()
        .init();

    settings.validate_and_warn();

    match args.command {
        Command::Encode { values } => {
            for value in values {
                let score: Score = value
                    .parse()
                    .with_context(|| format!("failed to parse score {value:?}"))?;
                println!("{}", codec::to_string(score));
            }
        }
        Command::Decode { json } => {
            for score in decode_all(&json)? {
                println!("{}", render(score, settings.output));
            }
        }
        Command::Rank { json } => {
            let ranked = rank(decode_all(&json)?);
            match settings.output {
                OutputFormat::Json => println!("{}", serde_json::to_string(&ranked)?),
                OutputFormat::Text => ranked.iter().for_each(|score| println!("{score}")),
            }
        }
    }

    Ok(())
}

fn decode_all(inputs: &[String]) -> anyhow::Result<Vec<Score>> {
    inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| -> anyhow::Result<Score> {
            let score = codec::from_str(input).map_err(|err| {
                log::error!("Can't decode score #{idx}: {err}");
                err
            })?;
            log::debug!("Decoded {input:?} as {score}");
            Ok(score)
        })
        .collect()
}

fn render(score: Score, output: OutputFormat) -> String {
    match output {
        OutputFormat::Text => score.to_string(),
        OutputFormat::Json => codec::to_string(score),
    }
}

/// Best score first. `OrderedFloat` compares NaN greatest, so it ranks first.
fn rank(mut scores: Vec<Score>) -> Vec<Score> {
    scores.sort_by_key(|score| Reverse(score.ordered()));
    scores
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Score::INFINITY, OutputFormat::Text, "Infinity")]
    #[case(Score::INFINITY, OutputFormat::Json, r#""Infinity""#)]
    #[case(Score::new(0.5), OutputFormat::Text, "0.5")]
    #[case(Score::new(0.5), OutputFormat::Json, "0.5")]
    fn render_formats(#[case] score: Score, #[case] output: OutputFormat, #[case] expected: &str) {
        assert_eq!(render(score, output), expected);
    }

    #[test]
    fn rank_best_first() {
        let inputs = ["1.5", r#""-Infinity""#, "3", r#""Infinity""#]
            .map(String::from)
            .to_vec();

        let ranked = rank(decode_all(&inputs).unwrap());
        assert_eq!(
            ranked,
            vec![
                Score::INFINITY,
                Score::new(3.0),
                Score::new(1.5),
                Score::NEG_INFINITY
            ]
        );
        assert_eq!(
            serde_json::to_string(&ranked).unwrap(),
            r#"["Infinity",3,1.5,"-Infinity"]"#
        );
    }

    #[test]
    fn decode_all_fails_on_first_bad_input() {
        let inputs = ["1", "banana"].map(String::from).to_vec();
        let err = decode_all(&inputs).unwrap_err();
        assert!(err
            .downcast_ref::<score::UnrepresentableScoreLiteral>()
            .is_some());
    }

    #[test]
    fn args_accept_negative_infinity() {
        let args = Args::try_parse_from(["score-tool", "encode", "-Infinity", "1"]).unwrap();
        match args.command {
            Command::Encode { values } => assert_eq!(values, ["-Infinity", "1"]),
            command => panic!("unexpected command {command:?}"),
        }
    }
}
