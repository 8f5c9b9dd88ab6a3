//! Labeled tumor measurements for training.
//!
//! Samples come either from the Wisconsin diagnostic dataset bundled with
//! smartcore or from a CSV export with one column per schema feature.

use crate::schema::{FEATURE_COUNT, FEATURE_NAMES};
use anyhow::{anyhow, bail, Context, Result};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Class value of malignant samples in the source data
pub const MALIGNANT: u32 = 0;
/// Class value of benign samples in the source data
pub const BENIGN: u32 = 1;

/// Feature rows in schema order with one class label per row
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    /// Human-readable description of the source
    pub source: String,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<u32>,
    pub class_names: BTreeMap<u32, String>,
}

impl LabeledDataset {
    /// Load from `path` when given, otherwise use the bundled dataset
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_csv(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The 569-sample Wisconsin diagnostic dataset shipped with smartcore
    pub fn builtin() -> Self {
        let dataset = smartcore::dataset::breast_cancer::load_dataset();

        let rows: Vec<Vec<f64>> = dataset
            .data
            .chunks(dataset.num_features)
            .map(|row| row.iter().map(|&v| v as f64).collect())
            .collect();
        let labels: Vec<u32> = dataset.target.iter().map(|&y| y as u32).collect();

        // smartcore ships a single descriptive string here rather than one
        // name per class
        let n_classes = {
            let mut classes = labels.clone();
            classes.sort_unstable();
            classes.dedup();
            classes.len()
        };
        let class_names = if dataset.target_names.len() == n_classes {
            dataset
                .target_names
                .iter()
                .enumerate()
                .map(|(class, name)| (class as u32, name.clone()))
                .collect()
        } else {
            default_class_names()
        };

        info!(
            samples = rows.len(),
            features = dataset.num_features,
            "Loaded bundled breast cancer dataset"
        );

        Self {
            source: "bundled Wisconsin diagnostic dataset".to_string(),
            rows,
            labels,
            class_names,
        }
    }

    /// Read a CSV file with a header row.
    ///
    /// The header must name every schema feature plus a label column: either
    /// `target` (0 = malignant, 1 = benign) or `diagnosis` (`M` / `B`).
    /// Columns may appear in any order and extra columns are ignored.
    /// Cells are split on every comma; quoted cells containing commas are not
    /// supported and such lines are rejected.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;

        let dataset = Self::parse_csv(&text, &path.display().to_string())
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;

        info!(
            path = %path.display(),
            samples = dataset.len(),
            "Loaded CSV dataset"
        );

        Ok(dataset)
    }

    fn parse_csv(text: &str, source: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_no, header) = lines.next().ok_or_else(|| anyhow!("dataset is empty"))?;
        check_quotes(header, header_no + 1)?;
        let columns: Vec<String> = split_row(header).map(str::to_string).collect();

        let feature_columns = FEATURE_NAMES
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| anyhow!("missing column `{name}`"))
            })
            .collect::<Result<Vec<usize>>>()?;

        let label_column = LabelColumn::find(&columns)?;

        let mut rows = Vec::new();
        let mut labels = Vec::new();

        for (line_no, line) in lines {
            let line_no = line_no + 1;
            check_quotes(line, line_no)?;
            let cells: Vec<&str> = split_row(line).collect();

            let row = feature_columns
                .iter()
                .map(|&i| {
                    let cell = cells
                        .get(i)
                        .ok_or_else(|| anyhow!("line {line_no}: missing column `{}`", columns[i]))?;
                    cell.parse::<f64>().map_err(|_| {
                        anyhow!("line {line_no}: `{cell}` in `{}` is not a number", columns[i])
                    })
                })
                .collect::<Result<Vec<f64>>>()?;

            let label = label_column.parse(&cells, line_no)?;

            rows.push(row);
            labels.push(label);
        }

        if rows.is_empty() {
            bail!("dataset has a header but no samples");
        }

        Ok(Self {
            source: source.to_string(),
            rows,
            labels,
            class_names: default_class_names(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct labels, ascending
    pub fn classes(&self) -> Vec<u32> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Check shape before fitting
    pub fn check(&self) -> Result<()> {
        if self.rows.is_empty() {
            bail!("dataset {} has no samples", self.source);
        }
        if self.rows.len() != self.labels.len() {
            bail!(
                "dataset {} has {} rows but {} labels",
                self.source,
                self.rows.len(),
                self.labels.len()
            );
        }
        if let Some(i) = self.rows.iter().position(|row| row.len() != FEATURE_COUNT) {
            bail!(
                "dataset {} row {} has {} features, expected {}",
                self.source,
                i,
                self.rows[i].len(),
                FEATURE_COUNT
            );
        }
        Ok(())
    }

    /// Rows as a dense matrix
    pub fn to_matrix(&self) -> DenseMatrix<f64> {
        DenseMatrix::from_2d_vec(&self.rows)
    }
}

fn default_class_names() -> BTreeMap<u32, String> {
    BTreeMap::from([
        (MALIGNANT, "malignant".to_string()),
        (BENIGN, "benign".to_string()),
    ])
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|cell| cell.trim().trim_matches('"'))
}

/// Rows are split on every comma, so a comma may not sit inside quotes
fn check_quotes(line: &str, line_no: usize) -> Result<()> {
    if line.matches('"').count() % 2 != 0 {
        bail!("line {line_no}: unbalanced quotes");
    }
    let quoted_comma = line
        .split('"')
        .enumerate()
        .any(|(i, part)| i % 2 == 1 && part.contains(','));
    if quoted_comma {
        bail!("line {line_no}: quoted cells containing commas are not supported");
    }
    Ok(())
}

enum LabelColumn {
    /// Numeric class value
    Target(usize),
    /// `M` / `B` letter
    Diagnosis(usize),
}

impl LabelColumn {
    fn find(columns: &[String]) -> Result<Self> {
        if let Some(i) = columns.iter().position(|c| c == "target") {
            Ok(LabelColumn::Target(i))
        } else if let Some(i) = columns.iter().position(|c| c == "diagnosis") {
            Ok(LabelColumn::Diagnosis(i))
        } else {
            bail!("missing label column `target` or `diagnosis`")
        }
    }

    fn parse(&self, cells: &[&str], line_no: usize) -> Result<u32> {
        match *self {
            LabelColumn::Target(i) => {
                let cell = cells
                    .get(i)
                    .ok_or_else(|| anyhow!("line {line_no}: missing `target`"))?;
                match cell.parse::<u32>() {
                    Ok(class @ (MALIGNANT | BENIGN)) => Ok(class),
                    _ => bail!("line {line_no}: target `{cell}` is not 0 or 1"),
                }
            }
            LabelColumn::Diagnosis(i) => {
                match cells.get(i).copied() {
                    Some("M") | Some("m") => Ok(MALIGNANT),
                    Some("B") | Some("b") => Ok(BENIGN),
                    Some(other) => bail!("line {line_no}: diagnosis `{other}` is not M or B"),
                    None => bail!("line {line_no}: missing `diagnosis`"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(label: &str, reversed: bool) -> String {
        let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
        if reversed {
            names.reverse();
        }
        let mut columns = vec!["id", label];
        columns.extend(names);
        columns.join(",")
    }

    fn row(id: u32, label: &str, reversed: bool) -> String {
        let mut values: Vec<String> = (0..FEATURE_COUNT).map(|i| format!("{}.5", i)).collect();
        if reversed {
            values.reverse();
        }
        let mut cells = vec![id.to_string(), label.to_string()];
        cells.extend(values);
        cells.join(",")
    }

    #[test]
    fn test_builtin_dataset() {
        let dataset = LabeledDataset::builtin();

        assert_eq!(dataset.len(), 569);
        assert!(dataset.rows.iter().all(|r| r.len() == FEATURE_COUNT));
        assert_eq!(dataset.classes(), vec![MALIGNANT, BENIGN]);
        assert!(dataset.check().is_ok());
    }

    #[test]
    fn test_builtin_dataset_names_every_class() {
        let dataset = LabeledDataset::builtin();

        assert_eq!(dataset.class_names, default_class_names());
        assert_eq!(dataset.class_names[&MALIGNANT], "malignant");
        assert_eq!(dataset.class_names[&BENIGN], "benign");

        let malignant = dataset.labels.iter().filter(|&&y| y == MALIGNANT).count();
        assert_eq!(malignant, 212);
        assert_eq!(dataset.len() - malignant, 357);
    }

    #[test]
    fn test_csv_columns_are_reordered_into_schema_order() {
        let text = [
            header("diagnosis", true),
            row(1, "M", true),
            row(2, "B", true),
        ]
        .join("\n");

        let dataset = LabeledDataset::parse_csv(&text, "test").unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels, vec![MALIGNANT, BENIGN]);
        assert_eq!(dataset.rows[0][0], 0.5); // radius_mean
        assert_eq!(dataset.rows[0][29], 29.5); // fractal_dimension_worst
    }

    #[test]
    fn test_csv_numeric_target() {
        let text = format!(
            "{}\n{}\n\n{}\n",
            header("target", false),
            row(1, "1", false),
            row(2, "0", false)
        );

        let dataset = LabeledDataset::parse_csv(&text, "test").unwrap();
        assert_eq!(dataset.labels, vec![BENIGN, MALIGNANT]);
        assert_eq!(dataset.rows[1][3], 3.5); // area_mean
    }

    #[test]
    fn test_csv_missing_feature_column() {
        let text = "id,diagnosis,radius_mean\n1,M,12.0\n";
        let err = LabeledDataset::parse_csv(text, "test").unwrap_err();
        assert!(err.to_string().contains("missing column `texture_mean`"));
    }

    #[test]
    fn test_csv_bad_label() {
        let text = [header("target", false), row(1, "2", false)].join("\n");
        let err = LabeledDataset::parse_csv(&text, "test").unwrap_err();
        assert!(err.to_string().contains("is not 0 or 1"));
    }

    #[test]
    fn test_csv_bad_number() {
        let mut bad = row(1, "M", false);
        bad = bad.replacen("3.5", "abc", 1);
        let text = [header("diagnosis", false), bad].join("\n");

        let err = LabeledDataset::parse_csv(&text, "test").unwrap_err();
        assert!(err.to_string().contains("`abc` in `area_mean` is not a number"));
    }

    #[test]
    fn test_csv_rejects_quoted_commas() {
        let mut quoted = row(1, "M", false);
        quoted = quoted.replacen("1,M", "1,\"M, confirmed\"", 1);
        let text = [header("diagnosis", false), quoted].join("\n");

        let err = LabeledDataset::parse_csv(&text, "test").unwrap_err();
        assert!(err.to_string().contains("line 2: quoted cells containing commas"));

        let text = [header("diagnosis", false), format!("{}\"", row(1, "M", false))].join("\n");
        let err = LabeledDataset::parse_csv(&text, "test").unwrap_err();
        assert!(err.to_string().contains("line 2: unbalanced quotes"));
    }

    #[test]
    fn test_csv_accepts_quoted_cells_without_commas() {
        let quoted = row(1, "M", false).replacen("1,M", "1,\"M\"", 1);
        let text = [header("diagnosis", false), quoted].join("\n");

        let dataset = LabeledDataset::parse_csv(&text, "test").unwrap();
        assert_eq!(dataset.labels, vec![MALIGNANT]);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LabeledDataset::from_csv(dir.path().join("absent.csv")).is_err());
    }
}
