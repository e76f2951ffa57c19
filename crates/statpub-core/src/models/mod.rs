pub mod import;
pub mod release_file;
pub mod upload;

pub use import::{Import, ImportStatus, ImportView, NewImport, NUM_PROCESSING_STAGES};
pub use release_file::{FileType, ReleaseFileReference};
pub use upload::UploadedFile;
