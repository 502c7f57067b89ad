use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::coin::Denomination;
use crate::machine::{MessageBundle, VendingMachine};
use crate::model::Command;

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open command file: {0}")]
    Open(csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: {op} missing argument")]
    MissingArg { line: usize, op: String },

    #[error("line {line}: {op} has invalid argument '{arg}'")]
    InvalidArg {
        line: usize,
        op: String,
        arg: String,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    op: String,
    arg: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    item: String,
    in_machine: String,
    returned: String,
}

/// Read machine commands from a csv file with an `op,arg` header
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<Command, CsvError> {
    let op = row.op.to_ascii_lowercase();
    let arg = || {
        row.arg
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| CsvError::MissingArg {
                line,
                op: op.clone(),
            })
    };
    let invalid = |arg: &str| CsvError::InvalidArg {
        line,
        op: op.clone(),
        arg: arg.to_string(),
    };

    match op.as_str() {
        "feed" => {
            let raw = arg()?;
            let count = raw.parse().map_err(|_| invalid(raw))?;
            Ok(Command::Feed { count })
        }
        "select" => {
            let raw = arg()?;
            let shelf = raw.parse().map_err(|_| invalid(raw))?;
            Ok(Command::Select { shelf })
        }
        "insert" => {
            let raw = arg()?;
            let coin: Denomination = raw.parse().map_err(|_| invalid(raw))?;
            Ok(Command::Insert { coin })
        }
        "cancel" => Ok(Command::Cancel),
        _ => Err(CsvError::UnrecognizedOp {
            line,
            op: row.op.clone(),
        }),
    }
}

/// Write the coin box, the tray and the display of `machine` in csv format
pub fn write_report(
    out: impl io::Write,
    machine: &VendingMachine,
    bundle: &MessageBundle,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);

    for coin in Denomination::descending() {
        writer.serialize(OutputRow {
            item: coin.to_string(),
            in_machine: machine.coins().get(coin).to_string(),
            returned: machine.returned_change().get(coin).to_string(),
        })?;
    }
    writer.serialize(OutputRow {
        item: "product".to_string(),
        in_machine: String::new(),
        returned: machine
            .returned_product()
            .map(|p| p.label())
            .unwrap_or_default(),
    })?;
    writer.serialize(OutputRow {
        item: "display".to_string(),
        in_machine: String::new(),
        returned: bundle.render(&machine.display()),
    })?;

    writer.flush()?;
    Ok(())
}
