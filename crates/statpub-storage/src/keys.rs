//! Shared key generation for storage backends.
//!
//! Key format: `releases/{release_id}/{file_type}/{filename}`.

use statpub_core::models::FileType;
use uuid::Uuid;

/// Generate the storage key for a file within a release.
///
/// All backends must use this format for consistency; uniqueness checks in
/// the validator address files by the same convention.
pub fn file_storage_key(release_id: Uuid, file_type: FileType, filename: &str) -> String {
    format!("releases/{}/{}/{}", release_id, file_type, filename)
}
