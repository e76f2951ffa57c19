use bytes::Bytes;
use uuid::Uuid;

/// An uploaded file as handed to the pipeline: the persisted file's identity,
/// its original filename, and the fully buffered content.
///
/// Content is buffered rather than streamed so validators can read it more
/// than once (MIME sniffing after size checks, row counting after
/// validation) without assuming a seekable stream.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: Uuid,
    pub filename: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(id: Uuid, filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        UploadedFile {
            id,
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of text lines in the content. A trailing newline does not
    /// start an extra line.
    pub fn line_count(&self) -> i64 {
        if self.content.is_empty() {
            return 0;
        }
        let newlines = self.content.iter().filter(|b| **b == b'\n').count() as i64;
        if self.content.ends_with(b"\n") {
            newlines
        } else {
            newlines + 1
        }
    }
}
