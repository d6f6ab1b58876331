//! Append-only per-user ledger of analysis results
//!
//! One record per line (JSONL). An append is a single write on a file
//! opened in append mode, so the record is the unit of atomicity and
//! concurrent runs never lose or interleave entries mid-line. Entries
//! are never edited or removed; totals are always a sum over history.

use crate::error::{RecircleError, Result};
use recircle_common::ResultRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const LEDGER_FILE_NAME: &str = "ledger.jsonl";

/// One ledger line: a result record tagged with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub user_id: String,
    pub record: ResultRecord,
}

pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(LEDGER_FILE_NAME),
        })
    }

    /// Append one record for a user. Never rewrites existing content.
    pub fn append(&self, user_id: &str, record: &ResultRecord) -> Result<()> {
        let entry = LedgerEntry {
            user_id: user_id.to_string(),
            record: record.clone(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// All records for one user, in append order.
    pub fn list_by_user(&self, user_id: &str) -> Result<Vec<ResultRecord>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.record)
            .collect())
    }

    /// Every user that has at least one ledger entry.
    pub fn list_user_ids(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .read_all()?
            .into_iter()
            .map(|entry| entry.user_id)
            .collect())
    }

    fn read_all(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)?;
        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            // A torn line surfaces as an error, not a silent skip.
            let entry = serde_json::from_str(&line).map_err(|e| {
                RecircleError::Storage(format!("{}:{}: {}", self.path.display(), idx + 1, e))
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}
