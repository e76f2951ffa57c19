//! Data archive inspection.
//!
//! A data archive is a zip holding exactly one data CSV and one metadata
//! CSV. Structural rules are checked against the central directory before
//! any entry content is read, so known-invalid archives are rejected
//! cheaply.

use std::io::{Cursor, Read};

use bytes::Bytes;
use statpub_core::validation::{is_meta_filename, ValidationError};

/// A validated pairing of one zip entry designated data and one designated
/// metadata. Exists only within the scope of a single upload request; never
/// persisted.
#[derive(Debug, Clone)]
pub struct DataArchiveFile {
    pub data_name: String,
    pub data_content: Bytes,
    pub meta_name: String,
    pub meta_content: Bytes,
}

/// Inspect a zip archive and identify its data and metadata entries.
///
/// Rules, in order, first failure wins:
/// 1. the archive must contain exactly two entries;
/// 2. both entry names must end in `.csv` (case-sensitive);
/// 3. exactly one entry name must carry the `.meta.` marker; that entry is
///    the metadata file, the other the data file, regardless of entry order.
///    Zero or two marked entries is ambiguous and fails rather than falling
///    back to positional guessing.
pub fn inspect_data_archive(zip_bytes: &[u8]) -> Result<DataArchiveFile, ValidationError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(zip_bytes))
        .map_err(|_| ValidationError::MustBeZipFile)?;

    if archive.len() != 2 {
        return Err(ValidationError::DataZipMustContainTwoFiles);
    }

    let mut names = Vec::with_capacity(2);
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|_| ValidationError::MustBeZipFile)?;
        names.push(entry.name().to_string());
    }

    if !names.iter().all(|name| name.ends_with(".csv")) {
        return Err(ValidationError::DataZipShouldContainCsvFiles);
    }

    let meta_index = match names.iter().filter(|name| is_meta_filename(name)).count() {
        1 => names.iter().position(|name| is_meta_filename(name)).unwrap_or(0),
        _ => return Err(ValidationError::DataZipMissingMetaFile),
    };
    let data_index = 1 - meta_index;

    let data_content = read_entry(&mut archive, data_index)?;
    let meta_content = read_entry(&mut archive, meta_index)?;

    Ok(DataArchiveFile {
        data_name: names[data_index].clone(),
        data_content,
        meta_name: names[meta_index].clone(),
        meta_content,
    })
}

fn read_entry(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    index: usize,
) -> Result<Bytes, ValidationError> {
    let mut entry = archive
        .by_index(index)
        .map_err(|_| ValidationError::MustBeZipFile)?;
    let mut buffer = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buffer)
        .map_err(|_| ValidationError::MustBeZipFile)?;
    Ok(Bytes::from(buffer))
}
