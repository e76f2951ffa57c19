use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Role of a file within a release. Stored as text; the repositories bind
/// the `Display` form and parse through `FromStr`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Data,
    Metadata,
    DataZip,
    Ancillary,
    Chart,
    Image,
}

impl FileType {
    /// Data-set kinds must go through the pair/archive validators, never the
    /// generic single-file path.
    pub fn is_data_set_kind(&self) -> bool {
        matches!(self, FileType::Data | FileType::Metadata | FileType::DataZip)
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileType::Data => write!(f, "data"),
            FileType::Metadata => write!(f, "metadata"),
            FileType::DataZip => write!(f, "data_zip"),
            FileType::Ancillary => write!(f, "ancillary"),
            FileType::Chart => write!(f, "chart"),
            FileType::Image => write!(f, "image"),
        }
    }
}

impl FromStr for FileType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(FileType::Data),
            "metadata" => Ok(FileType::Metadata),
            "data_zip" => Ok(FileType::DataZip),
            "ancillary" => Ok(FileType::Ancillary),
            "chart" => Ok(FileType::Chart),
            "image" => Ok(FileType::Image),
            _ => Err(anyhow::anyhow!("Invalid file type: {}", s)),
        }
    }
}

/// A file linked to a release, as the pipeline sees it: enough to check
/// naming uniqueness and to verify cancellation targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseFileReference {
    pub id: Uuid,
    pub release_id: Uuid,
    pub filename: String,
    pub file_type: FileType,
    /// Set when a later upload superseded this file; replaced files do not
    /// block reuse of their filename.
    pub replaced_by: Option<Uuid>,
    pub created: DateTime<Utc>,
}

#[cfg(feature = "sqlx")]
impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for ReleaseFileReference {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;
        Ok(ReleaseFileReference {
            id: row.get("id"),
            release_id: row.get("release_id"),
            filename: row.get("filename"),
            file_type: row.get::<String, _>("file_type").parse().map_err(|e| {
                sqlx::Error::Decode(format!("Failed to parse file type: {}", e).into())
            })?,
            replaced_by: row.get("replaced_by"),
            created: row.get("created"),
        })
    }
}
