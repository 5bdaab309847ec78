//! CSV loader for the engagement dataset
//!
//! Expected columns (any order, extra columns ignored):
//! `post_id,post_type,likes,shares,comments,avg_sentiment_score`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{EngagementDataset, EngagementRecord};

/// Columns every engagement file must carry
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "post_id",
    "post_type",
    "likes",
    "shares",
    "comments",
    "avg_sentiment_score",
];

/// Positions of the required columns in the header row
struct ColumnIndex {
    post_id: usize,
    post_type: usize,
    likes: usize,
    shares: usize,
    comments: usize,
    sentiment: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| find(c).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(Error::DataLoad(format!(
                "missing required column(s): {} (found: {})",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            )));
        }

        // All present, checked above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            post_id: at("post_id"),
            post_type: at("post_type"),
            likes: at("likes"),
            shares: at("shares"),
            comments: at("comments"),
            sentiment: at("avg_sentiment_score"),
        })
    }
}

/// Load the dataset from a CSV file on disk
pub fn load_dataset(path: &Path) -> Result<EngagementDataset> {
    let file = File::open(path)
        .map_err(|e| Error::DataLoad(format!("cannot open {}: {}", path.display(), e)))?;
    let dataset = parse_dataset(file)
        .map_err(|e| match e {
            Error::DataLoad(msg) => Error::DataLoad(format!("{}: {}", path.display(), msg)),
            other => Error::DataLoad(format!("{}: {}", path.display(), other)),
        })?;
    info!(
        "Loaded {} posts ({} post types) from {}",
        dataset.len(),
        dataset.categories().len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse engagement records from any CSV reader
pub fn parse_dataset<R: Read>(reader: R) -> Result<EngagementDataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;
        records.push(parse_row(&record, &columns, row)?);
    }

    debug!("Parsed {} engagement records", records.len());
    Ok(EngagementDataset::new(records))
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<EngagementRecord> {
    let text = |idx: usize, name: &str| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.to_string())
            .ok_or_else(|| Error::DataLoad(format!("row {row}: missing value for '{name}'")))
    };

    let post_type = text(columns.post_type, "post_type")?;
    if post_type.is_empty() {
        return Err(Error::DataLoad(format!("row {row}: empty post_type")));
    }

    Ok(EngagementRecord {
        post_id: text(columns.post_id, "post_id")?,
        post_type,
        likes: parse_count(&text(columns.likes, "likes")?, "likes", row)?,
        shares: parse_count(&text(columns.shares, "shares")?, "shares", row)?,
        comments: parse_count(&text(columns.comments, "comments")?, "comments", row)?,
        avg_sentiment_score: parse_score(
            &text(columns.sentiment, "avg_sentiment_score")?,
            row,
        )?,
    })
}

/// Parse a non-negative counter
fn parse_count(s: &str, column: &str, row: usize) -> Result<u64> {
    s.parse::<u64>().map_err(|_| {
        Error::DataLoad(format!(
            "row {row}: invalid {column} value '{s}' (expected a non-negative integer)"
        ))
    })
}

fn parse_score(s: &str, row: usize) -> Result<f64> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::DataLoad(format!(
            "row {row}: invalid avg_sentiment_score value '{s}'"
        ))),
    }
}
