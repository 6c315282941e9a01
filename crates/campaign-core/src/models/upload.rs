use serde::Serialize;
use std::fmt;
use std::path::Path;
use validator::Validate;

use crate::error::CoreError;

/// Content type the upload form accepts.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// A file picked for upload.
///
/// The PNG restriction is applied when a file is selected, not here: an
/// `ImageFile` built from arbitrary bytes is accepted as-is.
///
/// Serializes as metadata only; the contents are never written out.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PNG_CONTENT_TYPE.to_string(),
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read a file from disk. The file name sent to the server is the last
    /// path component.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let bytes = std::fs::read(path).map_err(|source| CoreError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.png")
            .to_string();

        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The editable upload form: a product name and an optional selected file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UploadDraft {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[validate(required(message = "A file is required"))]
    pub file: Option<ImageFile>,
}

impl UploadDraft {
    pub fn new(product_name: impl Into<String>, file: Option<ImageFile>) -> Self {
        Self {
            product_name: product_name.into(),
            file,
        }
    }

    pub fn set_product_name(&mut self, product_name: impl Into<String>) {
        self.product_name = product_name.into();
    }

    pub fn select_file(&mut self, file: ImageFile) {
        self.file = Some(file);
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.product_name.is_empty() && self.file.is_none()
    }

    /// Turn the draft into a request. Returns `None` when the file is missing;
    /// callers gate on [`crate::validation::validate_upload`] first.
    pub fn to_request(&self) -> Option<UploadRequest> {
        let file = self.file.clone()?;
        Some(UploadRequest {
            product_name: self.product_name.clone(),
            file,
        })
    }
}

/// An upload that passed validation, sent as multipart to `POST {base}/upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub product_name: String,
    pub file: ImageFile,
}
