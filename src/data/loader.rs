//! CSV Data Loader Module
//! Loads the ten result tables with Polars, best effort: a missing or
//! unparseable file leaves an empty table in its slot and a warning for the UI.

use super::schema::ResultTable;
use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoaderError {
    #[error("Error loading data file {}: {reason}", .path.display())]
    MissingResource { path: PathBuf, reason: String },
}

/// A table that could not be loaded, kept for display.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    pub table: ResultTable,
    pub error: LoaderError,
}

/// The ten tables in slot order. Slots that failed to load hold an empty frame.
#[derive(Debug, Clone)]
pub struct LoadedTables {
    frames: Vec<DataFrame>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadedTables {
    /// Get the frame loaded for a table (empty if it failed to load).
    pub fn get(&self, table: ResultTable) -> &DataFrame {
        &self.frames[table.slot() - 1]
    }

    /// Number of tables that loaded with at least one row.
    pub fn available_count(&self) -> usize {
        self.frames.iter().filter(|df| df.height() > 0).count()
    }

    /// Build from already-loaded frames; unlisted slots stay empty.
    #[cfg(test)]
    pub fn from_frames(frames: Vec<(ResultTable, DataFrame)>) -> Self {
        let mut slots: Vec<DataFrame> = (0..ResultTable::ALL.len())
            .map(|_| DataFrame::empty())
            .collect();
        for (table, df) in frames {
            slots[table.slot() - 1] = df;
        }
        Self {
            frames: slots,
            warnings: Vec::new(),
        }
    }
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader {
    results_dir: PathBuf,
}

impl DataLoader {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Load a single CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::MissingResource {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::MissingResource {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(path = %path.display(), rows = df.height(), "loaded csv");
        Ok(df)
    }

    /// Expected columns of `table` that `df` lacks.
    pub fn missing_columns(table: ResultTable, df: &DataFrame) -> Vec<&'static str> {
        table
            .columns()
            .iter()
            .copied()
            .filter(|column| df.get_column_index(column).is_none())
            .collect()
    }

    /// Load every result table. Files are read in parallel; one failure
    /// never aborts the others.
    pub fn load_all(&self) -> LoadedTables {
        info!(dir = %self.results_dir.display(), "loading result tables");

        let results: Vec<(ResultTable, Result<DataFrame, LoaderError>)> = ResultTable::ALL
            .par_iter()
            .map(|&table| {
                let path = self.results_dir.join(table.file_name());
                (table, Self::load_csv(&path))
            })
            .collect();

        let mut frames = Vec::with_capacity(results.len());
        let mut warnings = Vec::new();
        for (table, result) in results {
            match result {
                Ok(df) => {
                    let missing = Self::missing_columns(table, &df);
                    if !missing.is_empty() {
                        warn!(table = ?table, ?missing, "result table lacks expected columns");
                    }
                    frames.push(df);
                }
                Err(error) => {
                    warn!(table = ?table, "{}", error);
                    frames.push(DataFrame::empty());
                    warnings.push(LoadWarning { table, error });
                }
            }
        }

        let loaded = LoadedTables { frames, warnings };
        info!(
            available = loaded.available_count(),
            missing = loaded.warnings.len(),
            "result tables loaded"
        );
        loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, table: ResultTable, contents: &str) {
        fs::write(dir.join(table.file_name()), contents).unwrap();
    }

    #[test]
    fn missing_file_is_a_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::load_csv(&dir.path().join("result1.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::MissingResource { .. }));
    }

    #[test]
    fn partial_directory_loads_what_exists() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            ResultTable::FlightsPerYear,
            "Year,Total_Flights\n2019,758000\n2020,600000\n",
        );
        write(
            dir.path(),
            ResultTable::AirlineCancellationPct,
            "AIRLINE,Cancellation_Percentage\nJetBlue,3.1\n",
        );

        let loaded = DataLoader::new(dir.path()).load_all();

        assert_eq!(loaded.get(ResultTable::FlightsPerYear).height(), 2);
        assert_eq!(loaded.get(ResultTable::AirlineCancellationPct).height(), 1);
        assert_eq!(loaded.get(ResultTable::DelayCauses).height(), 0);
        assert_eq!(loaded.available_count(), 2);
        assert_eq!(loaded.warnings.len(), 8);
        assert!(loaded
            .warnings
            .iter()
            .all(|w| w.table != ResultTable::FlightsPerYear));
    }

    #[test]
    fn empty_and_malformed_files_become_empty_slots() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ResultTable::FlightsPerYear, "");
        write(
            dir.path(),
            ResultTable::CancellationsPerYear,
            "Year,Total_Cancellations\n2019,12,7,extra\n",
        );
        write(
            dir.path(),
            ResultTable::AirlineAverageDelay,
            "AIRLINE,Average_Departure_Delay\nDelta,5.0\n",
        );

        let loaded = DataLoader::new(dir.path()).load_all();

        assert_eq!(loaded.get(ResultTable::FlightsPerYear).height(), 0);
        assert_eq!(loaded.get(ResultTable::CancellationsPerYear).height(), 0);
        assert_eq!(loaded.get(ResultTable::AirlineAverageDelay).height(), 1);
        let warned: Vec<ResultTable> = loaded.warnings.iter().map(|w| w.table).collect();
        assert!(warned.contains(&ResultTable::FlightsPerYear));
        assert!(warned.contains(&ResultTable::CancellationsPerYear));
        assert!(!warned.contains(&ResultTable::AirlineAverageDelay));
    }

    #[test]
    fn missing_columns_are_reported_against_the_schema() {
        let df = df!(
            "Route" => &["SEA-HOU"],
            "Departure_Delay_Percentage" => &[12.5]
        )
        .unwrap();
        assert_eq!(
            DataLoader::missing_columns(ResultTable::RouteDelayPct, &df),
            vec!["Arrival_Delay_Percentage"]
        );
        let full = df!("Year" => &[2019i64], "Total_Flights" => &[10i64]).unwrap();
        assert!(DataLoader::missing_columns(ResultTable::FlightsPerYear, &full).is_empty());
    }

    #[test]
    fn warnings_follow_slot_order() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = DataLoader::new(dir.path()).load_all();
        let tables: Vec<ResultTable> = loaded.warnings.iter().map(|w| w.table).collect();
        assert_eq!(tables, ResultTable::ALL.to_vec());
    }

    #[test]
    fn from_frames_fills_unlisted_slots_with_empty_frames() {
        let df = df!("Year" => &[2019i64], "Total_Flights" => &[10i64]).unwrap();
        let loaded = LoadedTables::from_frames(vec![(ResultTable::FlightsPerYear, df)]);
        assert_eq!(loaded.get(ResultTable::FlightsPerYear).height(), 1);
        assert_eq!(loaded.get(ResultTable::RouteDelayPct).height(), 0);
    }
}
