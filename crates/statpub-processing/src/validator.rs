//! Ordered upload validation rules.
//!
//! Rules are applied in a fixed, documented precedence and short-circuit at
//! the first failure, so the same invalid upload always reports the same
//! problem. User-caused failures return `ValidationError` values via
//! `AppError::Validation`; store failures abort as system errors.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use statpub_core::models::{FileType, UploadedFile};
use statpub_core::validation::{
    filename_has_illegal_characters, has_csv_extension, is_meta_filename,
    subject_name_has_reserved_characters, ValidationError,
};
use statpub_core::{AppError, Config};
use statpub_db::ReleaseFileStore;
use statpub_storage::{file_storage_key, Storage};

use crate::archive::{inspect_data_archive, DataArchiveFile};
use crate::file_type::{
    matches_any_mime_type, matches_encoding, CSV_ENCODINGS, CSV_MIME_TYPES, ZIP_MIME_TYPES,
};

/// Validates uploads against a release before anything is persisted.
pub struct UploadValidator {
    release_files: Arc<dyn ReleaseFileStore>,
    storage: Arc<dyn Storage>,
    max_ancillary_file_size: usize,
    max_chart_file_size: usize,
    ancillary_mime_types: Vec<String>,
    chart_mime_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        release_files: Arc<dyn ReleaseFileStore>,
        storage: Arc<dyn Storage>,
        config: &Config,
    ) -> Self {
        Self {
            release_files,
            storage,
            max_ancillary_file_size: config.max_ancillary_file_size_bytes,
            max_chart_file_size: config.max_chart_file_size_bytes,
            ancillary_mime_types: config.ancillary_allowed_mime_types.clone(),
            chart_mime_types: config.chart_allowed_mime_types.clone(),
        }
    }

    /// A filename is taken when it is registered un-replaced for the release
    /// or a blob already sits at its storage path. The blob check guards
    /// against records and storage drifting apart.
    async fn filename_taken(
        &self,
        release_id: Uuid,
        file_type: FileType,
        filename: &str,
    ) -> Result<bool, AppError> {
        if self
            .release_files
            .filename_in_use(release_id, file_type, filename)
            .await?
        {
            return Ok(true);
        }
        let key = file_storage_key(release_id, file_type, filename);
        self.storage
            .exists(&key)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }

    /// Validate a loose data/metadata file pair.
    #[tracing::instrument(skip(self, data, meta), fields(data_file = %data.filename, meta_file = %meta.filename))]
    pub async fn validate_data_set_pair(
        &self,
        release_id: Uuid,
        data: &UploadedFile,
        meta: &UploadedFile,
    ) -> Result<(), AppError> {
        self.apply_pair_rules(
            release_id,
            &data.filename,
            &data.content,
            &meta.filename,
            &meta.content,
        )
        .await
    }

    /// Validate a zipped data set and identify its data/metadata entries.
    ///
    /// Archive-level rules run first, then structural inspection, then the
    /// pair rules against the extracted entries. Structural failures are
    /// reported before any content sniffing is attempted.
    #[tracing::instrument(skip(self, archive), fields(zip_file = %archive.filename))]
    pub async fn validate_data_archive(
        &self,
        release_id: Uuid,
        archive: &UploadedFile,
    ) -> Result<DataArchiveFile, AppError> {
        if filename_has_illegal_characters(&archive.filename) {
            return Err(ValidationError::ZipFilenameCannotContainSpecialCharacters.into());
        }
        if !archive.filename.to_lowercase().ends_with(".zip") {
            return Err(ValidationError::MustBeZipFile.into());
        }
        if self
            .filename_taken(release_id, FileType::DataZip, &archive.filename)
            .await?
        {
            return Err(ValidationError::CannotOverwriteZipFile.into());
        }
        if archive.is_empty() {
            return Err(ValidationError::ZipFileCannotBeEmpty.into());
        }
        if !matches_any_mime_type(&archive.content, ZIP_MIME_TYPES) {
            return Err(ValidationError::MustBeZipFile.into());
        }

        let extracted = inspect_data_archive(&archive.content)?;

        self.apply_pair_rules(
            release_id,
            &extracted.data_name,
            &extracted.data_content,
            &extracted.meta_name,
            &extracted.meta_content,
        )
        .await?;

        Ok(extracted)
    }

    /// Validate a single ancillary, chart, or image upload.
    ///
    /// Data-set kinds must go through the pair or archive validators;
    /// passing one here is a caller bug, not a user error, and aborts.
    #[tracing::instrument(skip(self, file), fields(filename = %file.filename, declared = %declared))]
    pub async fn validate_single(
        &self,
        release_id: Uuid,
        file: &UploadedFile,
        declared: FileType,
    ) -> Result<(), AppError> {
        assert!(
            !declared.is_data_set_kind(),
            "data set uploads must be validated as a pair or archive, got {declared}"
        );

        if filename_has_illegal_characters(&file.filename) {
            return Err(ValidationError::FilenameCannotContainSpecialCharacters.into());
        }
        if self
            .filename_taken(release_id, declared, &file.filename)
            .await?
        {
            return Err(ValidationError::CannotOverwriteFile.into());
        }
        if file.is_empty() {
            return Err(ValidationError::FileCannotBeEmpty.into());
        }

        let max = match declared {
            FileType::Ancillary => self.max_ancillary_file_size,
            _ => self.max_chart_file_size,
        };
        if file.size() > max {
            return Err(ValidationError::FileSizeExceedsLimit {
                size: file.size(),
                max,
            }
            .into());
        }

        let allowed = match declared {
            FileType::Ancillary => &self.ancillary_mime_types,
            _ => &self.chart_mime_types,
        };
        if !matches_any_mime_type(&file.content, allowed) {
            return Err(ValidationError::FileTypeInvalid.into());
        }

        Ok(())
    }

    /// Validate a proposed subject name for a new data set.
    #[tracing::instrument(skip(self))]
    pub async fn validate_subject_name(
        &self,
        release_id: Uuid,
        name: &str,
    ) -> Result<(), AppError> {
        if subject_name_has_reserved_characters(name) {
            return Err(ValidationError::SubjectNameCannotContainSpecialCharacters.into());
        }
        if self
            .release_files
            .subject_name_in_use(release_id, name)
            .await?
        {
            return Err(ValidationError::SubjectNameNotUnique.into());
        }
        Ok(())
    }

    /// The ordered pair rule set, shared by loose pairs and archive entries.
    async fn apply_pair_rules(
        &self,
        release_id: Uuid,
        data_name: &str,
        data_content: &Bytes,
        meta_name: &str,
        meta_content: &Bytes,
    ) -> Result<(), AppError> {
        // 1. the two files cannot share a name
        if data_name.eq_ignore_ascii_case(meta_name) {
            return Err(ValidationError::DataAndMetaFilesCannotHaveSameName.into());
        }

        // 2. no spaces, ampersands, or OS-reserved characters
        if filename_has_illegal_characters(data_name) {
            return Err(ValidationError::DataFilenameCannotContainSpecialCharacters.into());
        }
        if filename_has_illegal_characters(meta_name) {
            return Err(ValidationError::MetaFilenameCannotContainSpecialCharacters.into());
        }

        // 3. the metadata file carries the marker
        if !is_meta_filename(meta_name) {
            return Err(ValidationError::MetaFileIsIncorrectlyNamed.into());
        }

        // 4. both names end in .csv
        if !has_csv_extension(data_name) {
            return Err(ValidationError::DataFileMustBeCsvFile.into());
        }
        if !has_csv_extension(meta_name) {
            return Err(ValidationError::MetaFileMustBeCsvFile.into());
        }

        // 5. neither name may collide with an existing, un-replaced file
        if self
            .filename_taken(release_id, FileType::Data, data_name)
            .await?
        {
            return Err(ValidationError::CannotOverwriteDataFile.into());
        }
        if self
            .filename_taken(release_id, FileType::Metadata, meta_name)
            .await?
        {
            return Err(ValidationError::CannotOverwriteMetaFile.into());
        }

        // 6. neither file may be empty
        if data_content.is_empty() {
            return Err(ValidationError::DataFileCannotBeEmpty.into());
        }
        if meta_content.is_empty() {
            return Err(ValidationError::MetaFileCannotBeEmpty.into());
        }

        // 7. content must sniff as CSV in an allowed encoding
        if !matches_any_mime_type(data_content, CSV_MIME_TYPES) {
            return Err(ValidationError::DataFileMustBeCsvFile.into());
        }
        if !matches_any_mime_type(meta_content, CSV_MIME_TYPES) {
            return Err(ValidationError::MetaFileMustBeCsvFile.into());
        }
        if !matches_encoding(data_content, CSV_ENCODINGS)
            || !matches_encoding(meta_content, CSV_ENCODINGS)
        {
            return Err(ValidationError::FileTypeInvalid.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes as StreamBytes;
    use futures::Stream;
    use statpub_core::models::ReleaseFileReference;
    use statpub_storage::{StorageError, StorageResult};
    use std::collections::HashSet;
    use std::io::{Cursor, Write};
    use std::pin::Pin;
    use zip::write::FileOptions;

    /// Blob store fake holding a set of occupied keys.
    #[derive(Default)]
    struct FakeStorage {
        keys: HashSet<String>,
    }

    impl FakeStorage {
        fn with_blob(mut self, key: &str) -> Self {
            self.keys.insert(key.to_string());
            self
        }
    }

    #[async_trait]
    impl Storage for FakeStorage {
        async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
            Ok(self.keys.contains(storage_key))
        }

        async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
            Err(StorageError::NotFound(storage_key.to_string()))
        }

        async fn download_stream(
            &self,
            storage_key: &str,
        ) -> StorageResult<Pin<Box<dyn Stream<Item = Result<StreamBytes, StorageError>> + Send>>>
        {
            Err(StorageError::NotFound(storage_key.to_string()))
        }

        async fn content_length(&self, storage_key: &str) -> StorageResult<u64> {
            Err(StorageError::NotFound(storage_key.to_string()))
        }

        async fn delete(&self, _storage_key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    /// In-memory release file store: a set of (file_type, lowercase filename)
    /// pairs plus taken subject names.
    #[derive(Default)]
    struct FakeReleaseFiles {
        files: HashSet<(FileType, String)>,
        subject_names: HashSet<String>,
    }

    impl FakeReleaseFiles {
        fn with_file(mut self, file_type: FileType, filename: &str) -> Self {
            self.files.insert((file_type, filename.to_lowercase()));
            self
        }

        fn with_subject_name(mut self, name: &str) -> Self {
            self.subject_names.insert(name.to_lowercase());
            self
        }
    }

    #[async_trait]
    impl ReleaseFileStore for FakeReleaseFiles {
        async fn get_file(
            &self,
            _release_id: Uuid,
            _file_id: Uuid,
        ) -> Result<Option<ReleaseFileReference>, AppError> {
            Ok(None)
        }

        async fn filename_in_use(
            &self,
            _release_id: Uuid,
            file_type: FileType,
            filename: &str,
        ) -> Result<bool, AppError> {
            Ok(self.files.contains(&(file_type, filename.to_lowercase())))
        }

        async fn subject_name_in_use(
            &self,
            _release_id: Uuid,
            name: &str,
        ) -> Result<bool, AppError> {
            Ok(self.subject_names.contains(&name.to_lowercase()))
        }
    }

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/statpub_test".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 5,
            environment: "test".to_string(),
            max_ancillary_file_size_bytes: 1024,
            max_chart_file_size_bytes: 512,
            ancillary_allowed_mime_types: vec![
                "application/pdf".to_string(),
                "text/plain".to_string(),
            ],
            chart_allowed_mime_types: vec!["image/png".to_string()],
        }
    }

    fn validator(store: FakeReleaseFiles) -> UploadValidator {
        UploadValidator::new(Arc::new(store), Arc::new(FakeStorage::default()), &test_config())
    }

    fn validator_with_storage(store: FakeReleaseFiles, storage: FakeStorage) -> UploadValidator {
        UploadValidator::new(Arc::new(store), Arc::new(storage), &test_config())
    }

    fn upload(filename: &str, content: &[u8]) -> UploadedFile {
        UploadedFile::new(Uuid::new_v4(), filename, content.to_vec())
    }

    fn csv_pair() -> (UploadedFile, UploadedFile) {
        (
            upload("pupils.csv", b"school,year\nabc,2024\n"),
            upload("pupils.meta.csv", b"col,label\nschool,School\n"),
        )
    }

    fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default();
            for (name, content) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer
    }

    fn validation_code(err: AppError) -> &'static str {
        match err {
            AppError::Validation(v) => v.error_code(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_valid_pair_passes() {
        let (data, meta) = csv_pair();
        let result = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(Uuid::new_v4(), &data, &meta)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_same_name_fails_regardless_of_content() {
        // Even with empty, non-CSV content the same-name rule reports first.
        let data = upload("PUPILS.META.CSV", b"");
        let meta = upload("pupils.meta.csv", b"");
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(Uuid::new_v4(), &data, &meta)
            .await
            .unwrap_err();
        assert_eq!(
            validation_code(err),
            "DATA_AND_META_FILES_CANNOT_HAVE_SAME_NAME"
        );
    }

    #[tokio::test]
    async fn test_special_characters_reported_per_file() {
        let meta_ok = upload("pupils.meta.csv", b"x\n");
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupil data.csv", b"x\n"),
                &meta_ok,
            )
            .await
            .unwrap_err();
        assert_eq!(
            validation_code(err),
            "DATA_FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
        );

        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", b"x\n"),
                &upload("pupils&more.meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(
            validation_code(err),
            "META_FILENAME_CANNOT_CONTAIN_SPACES_OR_SPECIAL_CHARACTERS"
        );
    }

    #[tokio::test]
    async fn test_meta_marker_required() {
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", b"x\n"),
                &upload("pupils-meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "META_FILE_IS_INCORRECTLY_NAMED");
    }

    #[tokio::test]
    async fn test_csv_extension_required_per_file() {
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.txt", b"x\n"),
                &upload("pupils.meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "DATA_FILE_MUST_BE_CSV_FILE");

        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", b"x\n"),
                &upload("pupils.meta.txt", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "META_FILE_MUST_BE_CSV_FILE");
    }

    #[tokio::test]
    async fn test_existing_filename_cannot_be_overwritten() {
        let (data, meta) = csv_pair();
        let store = FakeReleaseFiles::default().with_file(FileType::Data, "pupils.csv");
        let err = validator(store)
            .validate_data_set_pair(Uuid::new_v4(), &data, &meta)
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "CANNOT_OVERWRITE_DATA_FILE");
    }

    #[tokio::test]
    async fn test_overwrite_check_is_case_insensitive() {
        let store = FakeReleaseFiles::default().with_file(FileType::Data, "pupils.csv");
        let data = upload("PUPILS.CSV", b"x\n");
        let meta = upload("pupils.meta.csv", b"x\n");
        let err = validator(store)
            .validate_data_set_pair(Uuid::new_v4(), &data, &meta)
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "CANNOT_OVERWRITE_DATA_FILE");
    }

    #[tokio::test]
    async fn test_existing_blob_blocks_overwrite_even_without_a_record() {
        let release_id = Uuid::new_v4();
        let key = statpub_storage::file_storage_key(release_id, FileType::Data, "pupils.csv");
        let storage = FakeStorage::default().with_blob(&key);
        let (data, meta) = csv_pair();

        let err = validator_with_storage(FakeReleaseFiles::default(), storage)
            .validate_data_set_pair(release_id, &data, &meta)
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "CANNOT_OVERWRITE_DATA_FILE");
    }

    #[tokio::test]
    async fn test_replaced_files_do_not_block_resubmission() {
        // The fake models only live files; a replaced file is simply absent.
        let (data, meta) = csv_pair();
        let result = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(Uuid::new_v4(), &data, &meta)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_files_rejected_per_file() {
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", b""),
                &upload("pupils.meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "DATA_FILE_CANNOT_BE_EMPTY");

        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", b"x\n"),
                &upload("pupils.meta.csv", b""),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "META_FILE_CANNOT_BE_EMPTY");
    }

    #[tokio::test]
    async fn test_binary_content_fails_mime_rule() {
        let png_payload = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", &png_payload),
                &upload("pupils.meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "DATA_FILE_MUST_BE_CSV_FILE");
    }

    #[tokio::test]
    async fn test_disallowed_encoding_fails() {
        let latin1: &[u8] = b"school,t\xE9l\xE9phone\n1,2\n";
        let err = validator(FakeReleaseFiles::default())
            .validate_data_set_pair(
                Uuid::new_v4(),
                &upload("pupils.csv", latin1),
                &upload("pupils.meta.csv", b"x\n"),
            )
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "FILE_TYPE_INVALID");
    }

    #[tokio::test]
    async fn test_archive_happy_path() {
        let zip = zip_with(&[
            ("pupils.csv", b"a,b\n1,2\n"),
            ("pupils.meta.csv", b"col,label\n"),
        ]);
        let archive = upload("pupils.zip", &zip);
        let extracted = validator(FakeReleaseFiles::default())
            .validate_data_archive(Uuid::new_v4(), &archive)
            .await
            .unwrap();
        assert_eq!(extracted.data_name, "pupils.csv");
        assert_eq!(extracted.meta_name, "pupils.meta.csv");
    }

    #[tokio::test]
    async fn test_archive_with_wrong_entry_extension_fails() {
        let zip = zip_with(&[("a.csv", b"a\n"), ("b.txt", b"b\n")]);
        let err = validator(FakeReleaseFiles::default())
            .validate_data_archive(Uuid::new_v4(), &upload("upload.zip", &zip))
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "DATA_ZIP_SHOULD_CONTAIN_CSV_FILES");
    }

    #[tokio::test]
    async fn test_archive_entry_count_checked_before_content() {
        let zip = zip_with(&[("only.csv", b"a\n")]);
        let err = validator(FakeReleaseFiles::default())
            .validate_data_archive(Uuid::new_v4(), &upload("upload.zip", &zip))
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "DATA_ZIP_MUST_CONTAIN_TWO_FILES");
    }

    #[tokio::test]
    async fn test_archive_that_is_not_a_zip_fails() {
        let err = validator(FakeReleaseFiles::default())
            .validate_data_archive(Uuid::new_v4(), &upload("upload.zip", b"plain text"))
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "MUST_BE_ZIP_FILE");
    }

    #[tokio::test]
    async fn test_archive_entries_are_checked_against_existing_files() {
        let zip = zip_with(&[
            ("pupils.csv", b"a,b\n"),
            ("pupils.meta.csv", b"col,label\n"),
        ]);
        let store = FakeReleaseFiles::default().with_file(FileType::Data, "pupils.csv");
        let err = validator(store)
            .validate_data_archive(Uuid::new_v4(), &upload("upload.zip", &zip))
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "CANNOT_OVERWRITE_DATA_FILE");
    }

    #[tokio::test]
    async fn test_archive_name_collision_fails_before_inspection() {
        let store = FakeReleaseFiles::default().with_file(FileType::DataZip, "upload.zip");
        let err = validator(store)
            .validate_data_archive(Uuid::new_v4(), &upload("upload.zip", b"irrelevant"))
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "CANNOT_OVERWRITE_ZIP_FILE");
    }

    #[tokio::test]
    async fn test_single_ancillary_file_passes() {
        let file = upload("guidance.pdf", b"%PDF-1.7 content");
        let result = validator(FakeReleaseFiles::default())
            .validate_single(Uuid::new_v4(), &file, FileType::Ancillary)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_single_file_size_limit() {
        let file = upload("guidance.pdf", &vec![b'a'; 2048]);
        let err = validator(FakeReleaseFiles::default())
            .validate_single(Uuid::new_v4(), &file, FileType::Ancillary)
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "FILE_SIZE_EXCEEDS_LIMIT");
    }

    #[tokio::test]
    async fn test_single_file_mime_allow_list() {
        // Text content is not an allowed chart type.
        let file = upload("chart.png", b"not really a png");
        let err = validator(FakeReleaseFiles::default())
            .validate_single(Uuid::new_v4(), &file, FileType::Chart)
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "FILE_TYPE_INVALID");
    }

    #[tokio::test]
    #[should_panic(expected = "validated as a pair or archive")]
    async fn test_single_file_with_reserved_kind_panics() {
        let file = upload("pupils.csv", b"a,b\n");
        let _ = validator(FakeReleaseFiles::default())
            .validate_single(Uuid::new_v4(), &file, FileType::Data)
            .await;
    }

    #[tokio::test]
    async fn test_subject_name_rules() {
        let store = FakeReleaseFiles::default().with_subject_name("Pupil absence");
        let validator = validator(store);
        let release_id = Uuid::new_v4();

        assert!(validator
            .validate_subject_name(release_id, "Exclusions by school")
            .await
            .is_ok());

        let err = validator
            .validate_subject_name(release_id, "Absence & exclusions")
            .await
            .unwrap_err();
        assert_eq!(
            validation_code(err),
            "SUBJECT_NAME_CANNOT_CONTAIN_SPECIAL_CHARACTERS"
        );

        let err = validator
            .validate_subject_name(release_id, "pupil absence")
            .await
            .unwrap_err();
        assert_eq!(validation_code(err), "SUBJECT_NAME_NOT_UNIQUE");
    }
}
