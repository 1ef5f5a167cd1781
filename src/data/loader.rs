use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{WorkloadRecord, WorkloadTable};

pub const TEACHER_ID: &str = "Teacher_ID";
pub const TASK: &str = "Task";
pub const HOURS_SPENT: &str = "Hours_Spent";
pub const CLASS_SIZE: &str = "Class_Size";

const REQUIRED_COLUMNS: [&str; 4] = [TEACHER_ID, TASK, HOURS_SPENT, CLASS_SIZE];

/// Schema problems the loader detects itself.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {found}")]
    UnexpectedType { column: &'static str, found: String },
    #[error("row {row}: null value in column '{column}'")]
    NullValue { column: &'static str, row: usize },
    #[error("row {row}: class size {value} is out of range")]
    ClassSizeOutOfRange { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a workload table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Teacher_ID,Task,Hours_Spent,Class_Size`
/// * `.json`    – `[{ "Teacher_ID": "T1", "Task": "grading", ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<WorkloadTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            load_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }?;

    log::info!(
        "Loaded {} workload rows for {} teachers from {}",
        table.len(),
        table.teacher_ids().len(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One row as written in the file. `Class_Size` is read as a number so that
/// `35.0` (how pandas writes an integer column that once held NaNs) loads.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Teacher_ID", deserialize_with = "id_as_text")]
    teacher_id: String,
    #[serde(rename = "Task")]
    task: String,
    #[serde(rename = "Hours_Spent")]
    hours_spent: f64,
    #[serde(rename = "Class_Size")]
    class_size: f64,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<WorkloadRecord, LoadError> {
        Ok(WorkloadRecord {
            class_size: class_size_from_f64(self.class_size, row)?,
            teacher_id: self.teacher_id,
            task: self.task,
            hours_spent: self.hours_spent,
        })
    }
}

/// Teacher ids show up as `T01` in some exports and as plain integers in
/// others; both are kept as text.
fn id_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(i) => i.to_string(),
        RawId::Float(f) => f.to_string(),
        RawId::Text(s) => s,
    })
}

/// Whole, non-negative class sizes only, whatever the source format.
fn class_size_from_f64(value: f64, row: usize) -> Result<u32, LoadError> {
    if !(0.0..=f64::from(u32::MAX)).contains(&value) || value.fract() != 0.0 {
        return Err(LoadError::ClassSizeOutOfRange { row, value });
    }
    Ok(value as u32)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row required; extra columns are ignored.
pub fn load_csv<R: Read>(input: R) -> Result<WorkloadTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(WorkloadTable::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// A record without one of the required keys is a missing column.
pub fn load_json(text: &str) -> Result<WorkloadTable> {
    let rows: Vec<JsonValue> = serde_json::from_str(text).context("parsing JSON")?;

    let mut records = Vec::with_capacity(rows.len());
    for (row_no, row) in rows.into_iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("JSON row {row_no} is not an object"))?;
        if let Some(column) = REQUIRED_COLUMNS.into_iter().find(|c| !obj.contains_key(*c)) {
            return Err(LoadError::MissingColumn(column).into());
        }
        let raw: RawRecord =
            serde_json::from_value(row).with_context(|| format!("JSON row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(WorkloadTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Accepted column types:
/// - `Teacher_ID`: Utf8 / LargeUtf8 / Int32 / Int64
/// - `Task`: Utf8 / LargeUtf8
/// - `Hours_Spent`: Float64 / Float32 / Int64 / Int32
/// - `Class_Size`: Int64 / Int32 / Float64
fn load_parquet(path: &Path) -> Result<WorkloadTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, records.len(), &mut records)?;
    }
    Ok(WorkloadTable::from_records(records))
}

fn append_batch(
    batch: &RecordBatch,
    first_row: usize,
    out: &mut Vec<WorkloadRecord>,
) -> Result<()> {
    let teacher = column(batch, TEACHER_ID)?;
    let task = column(batch, TASK)?;
    let hours = column(batch, HOURS_SPENT)?;
    let class = column(batch, CLASS_SIZE)?;

    for row in 0..batch.num_rows() {
        let abs_row = first_row + row;
        let class_size = extract_f64(class, CLASS_SIZE, row, abs_row)?;
        let class_size = class_size_from_f64(class_size, abs_row)?;
        out.push(WorkloadRecord::new(
            &extract_text(teacher, TEACHER_ID, row, abs_row)?,
            &extract_text(task, TASK, row, abs_row)?,
            extract_f64(hours, HOURS_SPENT, row, abs_row)?,
            class_size,
        ));
    }
    Ok(())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

fn unexpected(column: &'static str, col: &Arc<dyn Array>) -> anyhow::Error {
    LoadError::UnexpectedType {
        column,
        found: format!("{:?}", col.data_type()),
    }
    .into()
}

fn downcast<'a, T: 'static>(col: &'a Arc<dyn Array>, name: &'static str) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| unexpected(name, col))
}

/// Read a text cell; integer ids are rendered as text.
fn extract_text(
    col: &Arc<dyn Array>,
    name: &'static str,
    row: usize,
    abs_row: usize,
) -> Result<String> {
    if col.is_null(row) {
        return Err(LoadError::NullValue { column: name, row: abs_row }.into());
    }
    let text = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(col, name)?.value(row).to_string(),
        DataType::LargeUtf8 => downcast::<LargeStringArray>(col, name)?.value(row).to_string(),
        DataType::Int32 if name == TEACHER_ID => {
            downcast::<Int32Array>(col, name)?.value(row).to_string()
        }
        DataType::Int64 if name == TEACHER_ID => {
            downcast::<Int64Array>(col, name)?.value(row).to_string()
        }
        _ => return Err(unexpected(name, col)),
    };
    Ok(text)
}

fn extract_f64(
    col: &Arc<dyn Array>,
    name: &'static str,
    row: usize,
    abs_row: usize,
) -> Result<f64> {
    if col.is_null(row) {
        return Err(LoadError::NullValue { column: name, row: abs_row }.into());
    }
    let value = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col, name)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col, name)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col, name)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col, name)?.value(row) as f64,
        _ => return Err(unexpected(name, col)),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use pretty_assertions::assert_eq;

    const CSV: &str = "\
Teacher_ID,Task,Hours_Spent,Class_Size
T1,grading,8,35
T1,planning,5.5,35
T2,grading,3.25,42
";

    #[test]
    fn csv_rows_load_in_order() {
        let table = load_csv(CSV.as_bytes()).unwrap();
        assert_eq!(
            table.records(),
            &[
                WorkloadRecord::new("T1", "grading", 8.0, 35),
                WorkloadRecord::new("T1", "planning", 5.5, 35),
                WorkloadRecord::new("T2", "grading", 3.25, 42),
            ]
        );
        assert_eq!(table.teacher_ids(), &["T1".to_string(), "T2".to_string()]);
    }

    #[test]
    fn csv_numeric_teacher_ids_and_extra_columns() {
        let csv = "Week,Teacher_ID,Task,Hours_Spent,Class_Size\n1,101,grading,2,30\n";
        let table = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0].teacher_id, "101");
        assert_eq!(table.records()[0].class_size, 30);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let err = load_csv("Teacher_ID,Task,Hours_Spent\nT1,grading,2\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(CLASS_SIZE))
        ));
    }

    #[test]
    fn csv_malformed_row_is_an_error() {
        let csv = "Teacher_ID,Task,Hours_Spent,Class_Size\nT1,grading,lots,30\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"Teacher_ID": "T1", "Task": "grading", "Hours_Spent": 8.0, "Class_Size": 35},
            {"Teacher_ID": 7, "Task": "planning", "Hours_Spent": 2, "Class_Size": 20}
        ]"#;
        let table = load_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1], WorkloadRecord::new("7", "planning", 2.0, 20));
    }

    #[test]
    fn whole_float_class_sizes_load_from_csv_and_json() {
        let csv = "Teacher_ID,Task,Hours_Spent,Class_Size\nT1,grading,8,35.0\n";
        let table = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.records()[0].class_size, 35);

        let json = r#"[
            {"Teacher_ID": "T1", "Task": "grading", "Hours_Spent": 8, "Class_Size": 35.0}
        ]"#;
        let table = load_json(json).unwrap();
        assert_eq!(table.records()[0].class_size, 35);
    }

    #[test]
    fn fractional_class_sizes_are_rejected() {
        let csv = "Teacher_ID,Task,Hours_Spent,Class_Size\nT1,grading,8,35\nT1,planning,2,35.5\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::ClassSizeOutOfRange { row: 1, value }) if *value == 35.5
        ));

        let json = r#"[
            {"Teacher_ID": "T1", "Task": "grading", "Hours_Spent": 8, "Class_Size": 35.5}
        ]"#;
        let err = load_json(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::ClassSizeOutOfRange { row: 0, .. })
        ));

        let csv = "Teacher_ID,Task,Hours_Spent,Class_Size\nT1,grading,8,-3\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::ClassSizeOutOfRange { row: 0, .. })
        ));
    }

    #[test]
    fn json_missing_key_is_a_missing_column() {
        let json = r#"[{"Teacher_ID": "T1", "Task": "grading", "Hours_Spent": 8}]"#;
        let err = load_json(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(CLASS_SIZE))
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("workload.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/teacher_workload.csv")).is_err());
    }

    #[test]
    fn parquet_round_trip_with_integer_ids() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(TEACHER_ID, DataType::Int64, false),
            Field::new(TASK, DataType::Utf8, false),
            Field::new(HOURS_SPENT, DataType::Float64, false),
            Field::new(CLASS_SIZE, DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(StringArray::from(vec!["grading", "admin"])),
                Arc::new(Float64Array::from(vec![6.5, 1.0])),
                Arc::new(Int64Array::from(vec![38, 22])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!(
            "workload-dashboard-test-{}.parquet",
            std::process::id()
        ));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            table.records(),
            &[
                WorkloadRecord::new("1", "grading", 6.5, 38),
                WorkloadRecord::new("2", "admin", 1.0, 22),
            ]
        );
    }
}
