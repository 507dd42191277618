//! Extension-based content types for uploads

use campline_core::api::ContentTypeResolver;
use campline_domain::constants::DEFAULT_CONTENT_TYPE;

/// [`ContentTypeResolver`] backed by the `mime_guess` extension table
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessResolver;

impl ContentTypeResolver for MimeGuessResolver {
    fn content_type_for(&self, file_name: &str) -> String {
        mime_guess::from_path(file_name).first_raw().unwrap_or(DEFAULT_CONTENT_TYPE).to_string()
    }
}
