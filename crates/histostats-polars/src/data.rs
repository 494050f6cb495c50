//! Column extraction and partitioning

use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::{Error, Result};

/// A numeric column with missing values removed
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    /// Finite values in row order
    pub values: Vec<f64>,
    /// Rows in the frame before anything was dropped
    pub total_rows: usize,
}

impl NumericColumn {
    /// Select `name` from `df` as `f64`, dropping nulls and non-finite values
    pub fn from_frame(df: &DataFrame, name: &str) -> Result<Self> {
        let column = df
            .column(name)
            .map_err(|_| Error::InvalidColumn(name.to_string()))?;

        let float_column = match column.dtype() {
            DataType::Float64 => column.clone(),
            DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8 => column.cast(&DataType::Float64)?,
            dt => {
                return Err(Error::TypeMismatch {
                    expected: "numeric".to_string(),
                    got: format!("{:?}", dt),
                });
            }
        };

        let values: Vec<f64> = float_column
            .f64()?
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        let total_rows = df.height();
        debug!(
            column = name,
            rows = total_rows,
            dropped = total_rows - values.len(),
            "Extracted numeric column"
        );

        Ok(Self {
            name: name.to_string(),
            values,
            total_rows,
        })
    }

    /// Rows removed as missing
    pub fn dropped(&self) -> usize {
        self.total_rows - self.values.len()
    }
}

/// Split `df` by the values of `grouping`
///
/// Levels are the grouping values rendered as strings, in order of first
/// appearance. Each partition keeps its rows in frame order. Rows whose
/// grouping value is null belong to no partition.
pub fn partition_levels(df: &DataFrame, grouping: &str) -> Result<Vec<(String, DataFrame)>> {
    let column = df
        .column(grouping)
        .map_err(|_| Error::InvalidColumn(grouping.to_string()))?;
    let as_text = column.cast(&DataType::String)?;
    let keys = as_text.str()?;

    let height = df.height();
    let mut levels: Vec<String> = Vec::new();
    let mut masks: Vec<Vec<bool>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (row, key) in keys.iter().enumerate() {
        let Some(key) = key else { continue };
        let slot = *index.entry(key.to_string()).or_insert_with(|| {
            levels.push(key.to_string());
            masks.push(vec![false; height]);
            levels.len() - 1
        });
        masks[slot][row] = true;
    }
    debug!(column = grouping, levels = levels.len(), "Partitioned frame");

    levels
        .into_iter()
        .zip(masks)
        .map(|(level, mask)| -> Result<(String, DataFrame)> {
            let mask = BooleanChunked::from_slice(PlSmallStr::from("mask"), &mask);
            Ok((level, df.filter(&mask)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_missing() {
        let df = df![
            "x" => [Some(1.0), None, Some(f64::NAN), Some(4.0)],
        ]
        .unwrap();
        let column = NumericColumn::from_frame(&df, "x").unwrap();
        assert_eq!(column.values, vec![1.0, 4.0]);
        assert_eq!(column.total_rows, 4);
        assert_eq!(column.dropped(), 2);
    }

    #[test]
    fn test_integer_columns_are_cast() {
        let df = df!["cyl" => [4i32, 6, 8, 6]].unwrap();
        let column = NumericColumn::from_frame(&df, "cyl").unwrap();
        assert_eq!(column.values, vec![4.0, 6.0, 8.0, 6.0]);
    }

    #[test]
    fn test_column_errors() {
        let df = df!["name" => ["a", "b"]].unwrap();
        assert!(matches!(
            NumericColumn::from_frame(&df, "missing"),
            Err(Error::InvalidColumn(c)) if c == "missing"
        ));
        assert!(matches!(
            NumericColumn::from_frame(&df, "name"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_partition_first_appearance_order() {
        let df = df![
            "value" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            "group" => [Some("b"), Some("a"), None, Some("b"), Some("c"), Some("a")],
        ]
        .unwrap();
        let parts = partition_levels(&df, "group").unwrap();
        let levels: Vec<&str> = parts.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(levels, ["b", "a", "c"]);

        let b = NumericColumn::from_frame(&parts[0].1, "value").unwrap();
        assert_eq!(b.values, vec![1.0, 4.0]);
        let total: usize = parts.iter().map(|(_, frame)| frame.height()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_partition_numeric_groups() {
        let df = df![
            "value" => [1.0, 2.0, 3.0],
            "cyl" => [8i32, 4, 8],
        ]
        .unwrap();
        let parts = partition_levels(&df, "cyl").unwrap();
        assert_eq!(parts[0].0, "8");
        assert_eq!(parts[1].0, "4");
        assert!(matches!(
            partition_levels(&df, "gear"),
            Err(Error::InvalidColumn(_))
        ));
    }
}
