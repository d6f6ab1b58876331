//! Community shop store
//!
//! Append-only JSONL of items listed for sale, same discipline as the
//! ledger: one item per line, no update or delete.

use crate::error::{RecircleError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

const SHOP_FILE_NAME: &str = "shop.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub seller: String,
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    pub price_inr: f64,
    #[serde(default)]
    pub image_path: Option<String>,
    pub listed_at: String,
}

pub struct ShopStore {
    path: PathBuf,
}

impl ShopStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(SHOP_FILE_NAME),
        })
    }

    pub fn add(&self, item: &ShopItem) -> Result<()> {
        if item.price_inr < 0.0 {
            return Err(RecircleError::Storage(format!(
                "price must be non-negative, got {}",
                item.price_inr
            )));
        }

        let mut line = serde_json::to_string(item)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// All listed items, oldest first.
    pub fn list_all(&self) -> Result<Vec<ShopItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)?;
        let mut items = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let item = serde_json::from_str(&line).map_err(|e| {
                RecircleError::Storage(format!("{}:{}: {}", self.path.display(), idx + 1, e))
            })?;
            items.push(item);
        }
        Ok(items)
    }
}
