//! Dataset manifest: what a records file contains, and which filter values it supports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::{match_key, CATEGORY_LABELS};
use crate::record::Record;
use crate::source::{fingerprint, parse_records};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub path: String,
    pub hash_sha256: String,
    pub record_count: u64,
    pub years: Vec<String>,
    pub categories: Vec<String>,
    pub region_count: u64,
    pub non_numeric_values: u64,
    pub missing_category: u64,
    pub warnings: Vec<String>,
}

pub fn analyze_records(path: &Path) -> Result<DatasetManifest, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let records = parse_records(&path.display().to_string(), &bytes).map_err(|e| e.to_string())?;
    Ok(summarize_records(
        &path.display().to_string(),
        &fingerprint(&bytes),
        &records,
    ))
}

pub fn summarize_records(path: &str, hash: &str, records: &[Record]) -> DatasetManifest {
    let mut warnings = Vec::new();
    let mut years = BTreeSet::new();
    let mut categories = BTreeSet::new();
    let mut regions = BTreeSet::new();
    let mut non_numeric = 0u64;
    let mut missing_category = 0u64;

    for (i, rec) in records.iter().enumerate() {
        years.insert(rec.year_text());
        regions.insert(rec.region.to_uppercase());
        match rec.category_text() {
            Some(c) => {
                categories.insert(c.trim().to_string());
            }
            None => missing_category += 1,
        }
        if !rec.numeric_value().is_finite() {
            non_numeric += 1;
            warnings.push(format!("non_numeric_value: index={} region={}", i, rec.region));
        }
        if rec.region.trim().is_empty() {
            warnings.push(format!("empty_region: index={}", i));
        }
    }

    for category in &categories {
        let known = CATEGORY_LABELS
            .iter()
            .any(|(_, label)| match_key(label) == match_key(category));
        if !known {
            warnings.push(format!("unmapped_category: {}", category));
        }
    }

    DatasetManifest {
        path: path.to_string(),
        hash_sha256: hash.to_string(),
        record_count: records.len() as u64,
        years: years.into_iter().collect(),
        categories: categories.into_iter().collect(),
        region_count: regions.len() as u64,
        non_numeric_values: non_numeric,
        missing_category,
        warnings,
    }
}

pub fn default_manifest_path(dataset_path: &Path) -> PathBuf {
    let mut p = dataset_path.to_path_buf();
    let fname = dataset_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("data.json");
    p.set_file_name(format!("{}.manifest.json", fname));
    p
}
