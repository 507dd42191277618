//! Protocol constants
//!
//! Header names, markers and defaults shared by the request pipeline and
//! its adapters.

/// Every resource URL must end (case-insensitively) with this marker,
/// optionally followed by a query string.
pub const JSON_RESOURCE_SUFFIX: &str = ".json";

/// Substring of a 401 `WWW-Authenticate` value that marks a stale token.
pub const TOKEN_EXPIRED_MARKER: &str = "expired_token";

/// Content type used when a file name has no known mapping.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of token-exchange request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Request headers
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_USER_AGENT: &str = "User-Agent";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_IF_MODIFIED_SINCE: &str = "If-Modified-Since";
pub const HEADER_IF_NONE_MATCH: &str = "If-None-Match";

// Response headers
pub const HEADER_ETAG: &str = "ETag";
pub const HEADER_LAST_MODIFIED: &str = "Last-Modified";
pub const HEADER_LOCATION: &str = "Location";
pub const HEADER_RETRY_AFTER: &str = "Retry-After";
pub const HEADER_WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// Field carrying the attachment token in an upload response.
pub const UPLOAD_TOKEN_FIELD: &str = "token";

/// Form field carrying an uploaded file
pub const UPLOAD_FILE_FIELD: &str = "file";

pub const BASE64_TRANSFER_ENCODING: &str = "base64";
