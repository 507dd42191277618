//! Multipart file uploads
//!
//! One exchange per file. Each body holds a single `file` part whose
//! content is base64-encoded and whose content type comes from a
//! [`ContentTypeResolver`]. Multipart framing is left to the transport.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use campline_domain::constants::{BASE64_TRANSFER_ENCODING, UPLOAD_FILE_FIELD, UPLOAD_TOKEN_FIELD};
use campline_domain::{JsonExt, MultipartFile, RequestBody, Result, UploadFile};
use tracing::{debug, info, instrument, warn};

use super::executor::RequestExecutor;
use super::ports::ContentTypeResolver;

/// Uploads files and collects the attachment token issued for each
pub struct MultipartUploader {
    executor: Arc<RequestExecutor>,
    content_types: Arc<dyn ContentTypeResolver>,
}

impl MultipartUploader {
    pub fn new(executor: Arc<RequestExecutor>, content_types: Arc<dyn ContentTypeResolver>) -> Self {
        Self { executor, content_types }
    }

    /// Upload `files` in order, returning file name → token.
    ///
    /// The batch is all-or-nothing: the first failing file aborts the rest
    /// and its error is returned, discarding tokens already collected for
    /// earlier files. Those earlier uploads are not rolled back server-side.
    ///
    /// # Errors
    /// The same classified failures as [`RequestExecutor::post`], plus
    /// [`campline_domain::ApiError::Decode`] when a success response has no
    /// string `token` field.
    #[instrument(skip(self, files), fields(files = files.len()))]
    pub fn upload(&self, url: &str, files: &[UploadFile]) -> Result<BTreeMap<String, String>> {
        let mut tokens = BTreeMap::new();

        for file in files {
            let content_type = self.content_types.content_type_for(&file.name);
            let part = file_part(&file.name, &content_type, &file.content);

            let response = self
                .executor
                .post_body(url, RequestBody::Multipart(part))
                .inspect_err(|err| {
                    warn!(file = %file.name, error_type = err.label(), "Upload failed, discarding batch");
                })?;
            let token = response.body().require_str(UPLOAD_TOKEN_FIELD)?;

            debug!(file = %file.name, %content_type, "File uploaded");
            tokens.insert(file.name.clone(), token.to_string());
        }

        info!(uploaded = tokens.len(), "Upload batch complete");
        Ok(tokens)
    }
}

impl std::fmt::Debug for MultipartUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartUploader").field("executor", &self.executor).finish_non_exhaustive()
    }
}

/// The single `file` part sent for `name`, content base64-encoded.
#[must_use]
pub fn file_part(name: &str, content_type: &str, content: &[u8]) -> MultipartFile {
    MultipartFile {
        field: UPLOAD_FILE_FIELD.to_string(),
        file_name: name.to_string(),
        content_type: content_type.to_string(),
        transfer_encoding: Some(BASE64_TRANSFER_ENCODING.to_string()),
        content: STANDARD.encode(content),
    }
}
