//! Data Processor Module
//! Group-by/top-N aggregation and the wide-to-long (melt) reshape feeding grouped bar charts.
//!
//! Missing-value policy: a null, NaN or non-numeric cell in a value column
//! counts as zero. Rows whose key cell is null belong to no group and are skipped.

use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Column '{column}' not found (available: {available})")]
    Schema { column: String, available: String },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Per-column sums for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    /// Aligned with `GroupedTotals::value_columns`.
    pub sums: Vec<f64>,
}

impl GroupTotal {
    /// Combined total across all value columns.
    pub fn total(&self) -> f64 {
        self.sums.iter().sum()
    }
}

/// Groups in ranked (or row) order, with the value columns they carry.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTotals {
    pub key_column: String,
    pub value_columns: Vec<String>,
    pub groups: Vec<GroupTotal>,
}

impl GroupedTotals {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum for a key and column, if both exist.
    #[cfg(test)]
    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        let col_idx = self.value_columns.iter().position(|c| c == column)?;
        self.groups
            .iter()
            .find(|g| g.key == key)
            .map(|g| g.sums[col_idx])
    }
}

/// One (key, cause, value) triple of a long table.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub key: String,
    pub variable: String,
    pub value: f64,
}

/// Long-format rows, outer order = group order, inner order = column order.
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub key_column: String,
    pub rows: Vec<LongRow>,
}

/// Handles table aggregation and reshaping.
pub struct DataProcessor;

impl DataProcessor {
    /// Get list of column names from a DataFrame.
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Fail with a schema error naming the first column `df` lacks.
    pub fn require_columns<'a>(
        df: &DataFrame,
        columns: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ProcessorError> {
        let available = Self::column_names(df);
        for column in columns {
            if !available.iter().any(|c| c == column) {
                return Err(ProcessorError::Schema {
                    column: column.to_string(),
                    available: if available.is_empty() {
                        "none".to_string()
                    } else {
                        available.join(", ")
                    },
                });
            }
        }
        Ok(())
    }

    /// Key cells as strings; `None` for null cells.
    fn key_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let key_str = df.column(column)?.cast(&DataType::String)?;
        let key_ca = key_str.str()?;
        Ok(key_ca
            .into_iter()
            .map(|k| k.map(|k| k.to_string()))
            .collect())
    }

    /// Value cells as f64, with null/NaN/unparseable cells as zero.
    fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, ProcessorError> {
        let value_f64 = df.column(column)?.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;
        Ok(value_ca
            .into_iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => x,
                _ => 0.0,
            })
            .collect())
    }

    /// Rows as-is (no grouping), keyed by `key_column`, skipping null keys.
    pub fn select_rows(
        df: &DataFrame,
        key_column: &str,
        value_columns: &[&str],
    ) -> Result<GroupedTotals, ProcessorError> {
        let needed = std::iter::once(key_column).chain(value_columns.iter().copied());
        Self::require_columns(df, needed)?;

        let keys = Self::key_values(df, key_column)?;
        let columns = value_columns
            .iter()
            .map(|c| Self::numeric_values(df, c))
            .collect::<Result<Vec<_>, _>>()?;

        let groups = keys
            .into_iter()
            .enumerate()
            .filter_map(|(row, key)| {
                key.map(|key| GroupTotal {
                    key,
                    sums: columns.iter().map(|values| values[row]).collect(),
                })
            })
            .collect();

        Ok(GroupedTotals {
            key_column: key_column.to_string(),
            value_columns: value_columns.iter().map(|c| c.to_string()).collect(),
            groups,
        })
    }

    /// Group rows by `key_column`, sum each value column per group, and keep
    /// the `n` groups with the largest combined total. Equal totals keep the
    /// order in which their keys first appear.
    pub fn aggregate_top_n(
        df: &DataFrame,
        key_column: &str,
        value_columns: &[&str],
        n: usize,
    ) -> Result<GroupedTotals, ProcessorError> {
        let rows = Self::select_rows(df, key_column, value_columns)?;

        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<GroupTotal> = Vec::new();
        for row in rows.groups {
            match index.get(&row.key) {
                Some(&slot) => {
                    for (sum, v) in groups[slot].sums.iter_mut().zip(row.sums.iter()) {
                        *sum += v;
                    }
                }
                None => {
                    index.insert(row.key.clone(), groups.len());
                    groups.push(row);
                }
            }
        }

        let distinct = groups.len();
        // sort_by is stable, so ties stay in first-seen order
        groups.sort_by(|a, b| b.total().partial_cmp(&a.total()).unwrap_or(Ordering::Equal));
        groups.truncate(n);

        debug!(
            key_column,
            distinct,
            kept = groups.len(),
            "aggregated top groups"
        );

        Ok(GroupedTotals {
            key_column: rows.key_column,
            value_columns: rows.value_columns,
            groups,
        })
    }

    /// Unpivot grouped totals into (key, column, value) rows: one per
    /// (group, value column), groups outer, columns inner.
    pub fn melt(grouped: &GroupedTotals) -> LongTable {
        let rows = grouped
            .groups
            .iter()
            .flat_map(|g| {
                grouped
                    .value_columns
                    .iter()
                    .zip(g.sums.iter())
                    .map(move |(column, &value)| LongRow {
                        key: g.key.clone(),
                        variable: column.clone(),
                        value,
                    })
            })
            .collect();

        LongTable {
            key_column: grouped.key_column.clone(),
            rows,
        }
    }
}
