use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Number of processing stages the worker moves an import through.
pub const NUM_PROCESSING_STAGES: i32 = 4;

/// Lifecycle state of an import.
///
/// Forward transitions from `Queued` through the stages to `Complete` are
/// driven by the worker; `Cancelling`/`Cancelled` is the cooperative
/// cancellation path and `Failed` is reachable from any processing stage.
/// `NotFound` is a sentinel produced by status queries when no record
/// exists; it is never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Queued,
    #[serde(rename = "stage_1")]
    Stage1,
    #[serde(rename = "stage_2")]
    Stage2,
    #[serde(rename = "stage_3")]
    Stage3,
    #[serde(rename = "stage_4")]
    Stage4,
    Complete,
    Failed,
    Cancelling,
    Cancelled,
    NotFound,
}

impl Display for ImportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImportStatus::Queued => write!(f, "queued"),
            ImportStatus::Stage1 => write!(f, "stage_1"),
            ImportStatus::Stage2 => write!(f, "stage_2"),
            ImportStatus::Stage3 => write!(f, "stage_3"),
            ImportStatus::Stage4 => write!(f, "stage_4"),
            ImportStatus::Complete => write!(f, "complete"),
            ImportStatus::Failed => write!(f, "failed"),
            ImportStatus::Cancelling => write!(f, "cancelling"),
            ImportStatus::Cancelled => write!(f, "cancelled"),
            ImportStatus::NotFound => write!(f, "not_found"),
        }
    }
}

impl FromStr for ImportStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(ImportStatus::Queued),
            "stage_1" => Ok(ImportStatus::Stage1),
            "stage_2" => Ok(ImportStatus::Stage2),
            "stage_3" => Ok(ImportStatus::Stage3),
            "stage_4" => Ok(ImportStatus::Stage4),
            "complete" => Ok(ImportStatus::Complete),
            "failed" => Ok(ImportStatus::Failed),
            "cancelling" => Ok(ImportStatus::Cancelling),
            "cancelled" => Ok(ImportStatus::Cancelled),
            "not_found" => Ok(ImportStatus::NotFound),
            _ => Err(anyhow::anyhow!("Invalid import status: {}", s)),
        }
    }
}

impl ImportStatus {
    /// 1-based index of the active processing stage, if this is a stage state.
    pub fn stage_index(&self) -> Option<i32> {
        match self {
            ImportStatus::Stage1 => Some(1),
            ImportStatus::Stage2 => Some(2),
            ImportStatus::Stage3 => Some(3),
            ImportStatus::Stage4 => Some(4),
            _ => None,
        }
    }

    /// Terminal states never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ImportStatus::Complete | ImportStatus::Failed | ImportStatus::Cancelled
        )
    }

    /// Anything other than `Complete` counts as incomplete for a release.
    pub fn is_incomplete(&self) -> bool {
        !matches!(self, ImportStatus::Complete)
    }

    /// Overall progress derived from the stage index and the stage-local
    /// percentage. Monotonic in both inputs; 100 exactly when complete.
    pub fn percentage_complete(&self, stage_percentage: i32) -> i32 {
        match self {
            ImportStatus::Complete => 100,
            _ => match self.stage_index() {
                Some(stage) => {
                    ((stage - 1) * 100 + stage_percentage.clamp(0, 100)) / NUM_PROCESSING_STAGES
                }
                None => 0,
            },
        }
    }
}

/// One submitted data set's processing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Import {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub file_id: Uuid,
    pub meta_file_id: Uuid,
    pub zip_file_id: Option<Uuid>,
    pub status: ImportStatus,
    /// Total line count of the data file, computed at submission time.
    /// Absent for archive imports, where counting is deferred to the worker.
    pub rows: Option<i64>,
    pub stage_percentage_complete: i32,
    /// Worker-written error messages; empty while queued.
    pub errors: Vec<String>,
    pub created: DateTime<Utc>,
    /// Records created by the historical migration path; always false here.
    pub migrated: bool,
}

#[cfg(feature = "sqlx")]
impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for Import {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(Import {
            id: row.get("id"),
            subject_id: row.get("subject_id"),
            file_id: row.get("file_id"),
            meta_file_id: row.get("meta_file_id"),
            zip_file_id: row.get("zip_file_id"),
            status: row.get::<String, _>("status").parse().map_err(|e| {
                sqlx::Error::Decode(format!("Failed to parse import status: {}", e).into())
            })?,
            rows: row.get("rows"),
            stage_percentage_complete: row.get("stage_percentage_complete"),
            errors: row.get::<Option<Vec<String>>, _>("errors").unwrap_or_default(),
            created: row.get("created"),
            migrated: row.get("migrated"),
        })
    }
}

/// Fields required to create an import record. Status, errors, creation time
/// and the migration flag are fixed by the store.
#[derive(Debug, Clone)]
pub struct NewImport {
    pub subject_id: Uuid,
    pub file_id: Uuid,
    pub meta_file_id: Uuid,
    pub zip_file_id: Option<Uuid>,
    pub rows: Option<i64>,
}

/// Caller-facing progress view derived from an import record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportView {
    pub errors: Vec<String>,
    pub percentage_complete: i32,
    pub stage_percentage_complete: i32,
    pub rows: Option<i64>,
    pub status: ImportStatus,
}

impl ImportView {
    /// The view returned when no import record exists for a file.
    pub fn not_found() -> Self {
        ImportView {
            errors: Vec::new(),
            percentage_complete: 0,
            stage_percentage_complete: 0,
            rows: None,
            status: ImportStatus::NotFound,
        }
    }
}

impl From<&Import> for ImportView {
    fn from(import: &Import) -> Self {
        ImportView {
            errors: import.errors.clone(),
            percentage_complete: import
                .status
                .percentage_complete(import.stage_percentage_complete),
            stage_percentage_complete: import.stage_percentage_complete,
            rows: import.rows,
            status: import.status,
        }
    }
}
