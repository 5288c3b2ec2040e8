use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::{Cents, Command, Outcome};

/// Errors that can occur when reading command scripts or writing outcomes
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: insert missing coin")]
    MissingCoin { line: usize },

    #[error("failed to write outcome: {0}")]
    Write(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    coin: Option<Cents>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    event: &'static str,
    value: String,
}

impl From<&Outcome> for OutputRow {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Inserted { coin } => OutputRow {
                event: "inserted",
                value: coin.to_string(),
            },
            Outcome::Display { minutes } => OutputRow {
                event: "display",
                value: minutes.to_string(),
            },
            Outcome::Receipt(receipt) => OutputRow {
                event: "receipt",
                value: receipt.minutes().to_string(),
            },
            Outcome::Returned(coins) => OutputRow {
                event: "returned",
                value: coins
                    .iter()
                    .map(|(coin, count)| format!("{coin}:{count}"))
                    .collect::<Vec<_>>()
                    .join(";"),
            },
            Outcome::Drained { cents } => OutputRow {
                event: "drained",
                value: cents.to_string(),
            },
        }
    }
}

/// Read station commands from a csv script with an `action,coin` header.
/// Every row carries both fields; `coin` is left empty except for `insert`.
///
/// Coin values are only checked for being non-negative integers here; a value
/// such as `-5` is a `Parse` error on its row, while any other unaccepted value
/// reaches the station and is rejected there as an invalid coin.
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.action.as_str() {
                "insert" => {
                    let coin = row.coin.ok_or(CsvError::MissingCoin { line })?;
                    Ok(Command::Insert(coin))
                }
                "display" => Ok(Command::Display),
                "buy" => Ok(Command::Buy),
                "cancel" => Ok(Command::Cancel),
                "drain" => Ok(Command::Drain),
                other => Err(CsvError::UnrecognizedAction {
                    line,
                    action: other.to_string(),
                }),
            }
        }))
}

/// Streams outcomes as csv rows with an `event,value` header
pub struct OutcomeWriter<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> OutcomeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn write(&mut self, outcome: &Outcome) -> Result<(), CsvError> {
        self.writer.serialize(OutputRow::from(outcome))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CsvError> {
        self.writer.flush().map_err(|e| CsvError::Write(e.into()))
    }
}

/// Write all outcomes to the given writer in csv format
pub fn write_outcomes<'a, W: io::Write>(
    writer: W,
    outcomes: impl IntoIterator<Item = &'a Outcome>,
) -> Result<(), CsvError> {
    let mut writer = OutcomeWriter::new(writer);
    for outcome in outcomes {
        writer.write(outcome)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoinReturn, Receipt};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn read_all_actions() {
        let file = write_csv("action,coin\ninsert,25\ndisplay,\nbuy,\ncancel,\ndrain,\n");
        let commands: Vec<_> = read_commands(file.path())
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(
            commands,
            vec![
                Command::Insert(25),
                Command::Display,
                Command::Buy,
                Command::Cancel,
                Command::Drain,
            ]
        );
    }

    #[test]
    fn read_with_whitespace() {
        let file = write_csv("action, coin\n insert , 10 \n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Ok(Command::Insert(10))));
    }

    #[test]
    fn read_keeps_unknown_coin_values() {
        // validation belongs to the station
        let file = write_csv("action,coin\ninsert,17\n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        assert!(matches!(results[0], Ok(Command::Insert(17))));
    }

    #[test]
    fn read_returns_error_for_unknown_action() {
        let file = write_csv("action,coin\ninsert,5\nrefund,\n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        assert_eq!(results.len(), 2);
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedAction { line: 3, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_coin() {
        let file = write_csv("action,coin\ninsert,\n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::MissingCoin { line: 2 }));
    }

    #[test]
    fn read_returns_error_for_bad_coin() {
        let file = write_csv("action,coin\ninsert,quarter\n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 2, .. }));
    }

    #[test]
    fn read_returns_parse_error_for_negative_coin() {
        let file = write_csv("action,coin\ninsert,-5\ninsert,5\n");
        let results: Vec<_> = read_commands(file.path()).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(CsvError::Parse { line: 2, .. })));
        assert!(matches!(results[1], Ok(Command::Insert(5))));
    }

    #[test]
    fn read_missing_file_fails() {
        let result = read_commands("does/not/exist.csv");
        assert!(matches!(result, Err(CsvError::Open(_))));
    }

    #[test]
    fn write_every_outcome_kind() {
        let outcomes = vec![
            Outcome::Inserted { coin: 25 },
            Outcome::Display { minutes: 10 },
            Outcome::Receipt(Receipt::new(16)),
            Outcome::Returned(CoinReturn::from([(25, 2), (5, 1)])),
            Outcome::Returned(CoinReturn::new()),
            Outcome::Drained { cents: 30 },
        ];

        let mut buf = Vec::new();
        write_outcomes(&mut buf, &outcomes).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "event,value",
                "inserted,25",
                "display,10",
                "receipt,16",
                "returned,5:1;25:2",
                "returned,",
                "drained,30",
            ]
        );
    }
}
