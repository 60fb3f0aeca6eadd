//! CSV import for broker history exports.
//!
//! Timestamps in the export are broker server time (`YYYY.MM.DD HH:MM:SS`)
//! and are converted to UTC via the broker's DST rule. A row whose open
//! time does not parse is kept with `open_time = None` — analytics excludes
//! it and reports it in the excluded-trades count rather than losing it
//! silently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tradelens_core::time::{parse_server_time, server_time_to_utc};
use tradelens_core::{Side, TradeId, TradeRecord};

#[derive(Debug, Error)]
pub enum CsvImportError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed CSV record: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown side {value:?} (expected buy or sell)")]
    UnknownSide { row: usize, value: String },
}

/// One row of the export, fields as strings where the format is loose.
#[derive(Debug, Deserialize)]
struct CsvTradeRow {
    ticket: i64,
    open_time: String,
    #[serde(default)]
    close_time: String,
    symbol: String,
    side: String,
    size: f64,
    open_price: f64,
    close_price: Option<f64>,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    commission: Option<f64>,
    tax: Option<f64>,
    swap: Option<f64>,
    profit: Option<f64>,
    #[serde(default)]
    memo: Option<String>,
}

/// Loads trade records from a CSV export file.
pub fn load_trades_csv(path: impl AsRef<Path>) -> Result<Vec<TradeRecord>, CsvImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvImportError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_trades(file)
}

/// Reads trade records from any CSV source with a header row.
pub fn read_trades(reader: impl Read) -> Result<Vec<TradeRecord>, CsvImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trades = Vec::new();
    for (i, result) in csv_reader.deserialize::<CsvTradeRow>().enumerate() {
        let row = result?;
        // Row 1 is the header.
        trades.push(row_to_trade(row, i + 2)?);
    }
    Ok(trades)
}

fn row_to_trade(row: CsvTradeRow, row_number: usize) -> Result<TradeRecord, CsvImportError> {
    let side = match row.side.to_ascii_lowercase().as_str() {
        "buy" => Side::Buy,
        "sell" => Side::Sell,
        other => {
            return Err(CsvImportError::UnknownSide {
                row: row_number,
                value: other.to_string(),
            })
        }
    };

    Ok(TradeRecord {
        id: TradeId(row.ticket),
        ticket: row.ticket,
        symbol: row.symbol,
        side,
        size: row.size,
        open_time: parse_server_time(&row.open_time).map(server_time_to_utc),
        close_time: parse_server_time(&row.close_time).map(server_time_to_utc),
        open_price: row.open_price,
        close_price: row.close_price,
        stop_loss: row.stop_loss,
        take_profit: row.take_profit,
        commission: row.commission,
        tax: row.tax,
        swap: row.swap,
        profit: row.profit,
        memo: row.memo.filter(|m| !m.is_empty()),
        batch_id: None,
    })
}
