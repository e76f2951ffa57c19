//! Upload validation rules
//!
//! Pure, deterministic naming rules shared by the pair, archive, and
//! single-file validators, and the typed validation error they all report.
//! Rule *ordering* lives in `statpub-processing`; the checks here are
//! order-independent building blocks.

mod filename;

pub use filename::{
    filename_has_illegal_characters, has_csv_extension, is_meta_filename,
    subject_name_has_reserved_characters, META_FILENAME_MARKER,
};

/// A user-caused upload rejection.
///
/// Each variant carries a stable machine-readable code (`error_code`) and a
/// human-readable message, and is returned as a value rather than raised, so
/// callers can render it to the end user. Infrastructure failures are never
/// represented here; they abort the operation as `AppError` system errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("data and metadata files cannot have the same name")]
    DataAndMetaFilesCannotHaveSameName,

    #[error("data filename cannot contain spaces or special characters")]
    DataFilenameCannotContainSpecialCharacters,

    #[error("metadata filename cannot contain spaces or special characters")]
    MetaFilenameCannotContainSpecialCharacters,

    #[error("metadata file is incorrectly named: expected the '.meta.' marker")]
    MetaFileIsIncorrectlyNamed,

    #[error("data file must be a CSV file")]
    DataFileMustBeCsvFile,

    #[error("metadata file must be a CSV file")]
    MetaFileMustBeCsvFile,

    #[error("cannot overwrite an existing data file of the same name")]
    CannotOverwriteDataFile,

    #[error("cannot overwrite an existing metadata file of the same name")]
    CannotOverwriteMetaFile,

    #[error("data file cannot be empty")]
    DataFileCannotBeEmpty,

    #[error("metadata file cannot be empty")]
    MetaFileCannotBeEmpty,

    #[error("archive must contain exactly two files")]
    DataZipMustContainTwoFiles,

    #[error("archive must contain CSV files")]
    DataZipShouldContainCsvFiles,

    #[error("archive must contain exactly one metadata file named with the '.meta.' marker")]
    DataZipMissingMetaFile,

    #[error("archive filename cannot contain spaces or special characters")]
    ZipFilenameCannotContainSpecialCharacters,

    #[error("file must be a ZIP archive")]
    MustBeZipFile,

    #[error("cannot overwrite an existing archive of the same name")]
    CannotOverwriteZipFile,

    #[error("archive cannot be empty")]
    ZipFileCannotBeEmpty,

    #[error("filename cannot contain spaces or special characters")]
    FilenameCannotContainSpecialCharacters,

    #[error("cannot overwrite an existing file of the same name")]
    CannotOverwriteFile,

    #[error("file cannot be empty")]
    FileCannotBeEmpty,

    #[error("file size {size} bytes exceeds the {max} byte limit")]
    FileSizeExceedsLimit { size: usize, max: usize },

    #[error("invalid file type")]
    FileTypeInvalid,

    #[error("subject name cannot contain special characters")]
    SubjectNameCannotContainSpecialCharacters,

    #[error("subject name is already in use by another data file in this release")]
    SubjectNameNotUnique,
}

impl ValidationError {
    /// Stable machine-readable code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::DataAndMetaFilesCannotHaveSameName => {
                "DATA_AND_META_FILES_CANNOT_HAVE_SAME_NAME"
            }
            ValidationError::DataFilenameCannotContainSpecialCharacters => {
                "DATA_FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
            }
            ValidationError::MetaFilenameCannotContainSpecialCharacters => {
                "META_FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
            }
            ValidationError::MetaFileIsIncorrectlyNamed => "META_FILE_IS_INCORRECTLY_NAMED",
            ValidationError::DataFileMustBeCsvFile => "DATA_FILE_MUST_BE_CSV_FILE",
            ValidationError::MetaFileMustBeCsvFile => "META_FILE_MUST_BE_CSV_FILE",
            ValidationError::CannotOverwriteDataFile => "CANNOT_OVERWRITE_DATA_FILE",
            ValidationError::CannotOverwriteMetaFile => "CANNOT_OVERWRITE_META_FILE",
            ValidationError::DataFileCannotBeEmpty => "DATA_FILE_CANNOT_BE_EMPTY",
            ValidationError::MetaFileCannotBeEmpty => "META_FILE_CANNOT_BE_EMPTY",
            ValidationError::DataZipMustContainTwoFiles => "DATA_ZIP_MUST_CONTAIN_TWO_FILES",
            ValidationError::DataZipShouldContainCsvFiles => "DATA_ZIP_SHOULD_CONTAIN_CSV_FILES",
            ValidationError::DataZipMissingMetaFile => "DATA_ZIP_MISSING_META_FILE",
            ValidationError::ZipFilenameCannotContainSpecialCharacters => {
                "ZIP_FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
            }
            ValidationError::MustBeZipFile => "MUST_BE_ZIP_FILE",
            ValidationError::CannotOverwriteZipFile => "CANNOT_OVERWRITE_ZIP_FILE",
            ValidationError::ZipFileCannotBeEmpty => "ZIP_FILE_CANNOT_BE_EMPTY",
            ValidationError::FilenameCannotContainSpecialCharacters => {
                "FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
            }
            ValidationError::CannotOverwriteFile => "CANNOT_OVERWRITE_FILE",
            ValidationError::FileCannotBeEmpty => "FILE_CANNOT_BE_EMPTY",
            ValidationError::FileSizeExceedsLimit { .. } => "FILE_SIZE_EXCEEDS_LIMIT",
            ValidationError::FileTypeInvalid => "FILE_TYPE_INVALID",
            ValidationError::SubjectNameCannotContainSpecialCharacters => {
                "SUBJECT_NAME_CANNOT_CONTAIN_SPECIAL_CHARACTERS"
            }
            ValidationError::SubjectNameNotUnique => "SUBJECT_NAME_NOT_UNIQUE",
        }
    }
}
