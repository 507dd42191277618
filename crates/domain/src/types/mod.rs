//! Data types exchanged between the pipeline, its ports and its callers

pub mod cache_entry;
pub mod credential;
pub mod http;
pub mod request;
pub mod response;
pub mod upload;

pub use cache_entry::CacheEntry;
pub use credential::Credential;
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse, MultipartFile, RequestBody};
pub use request::{validate_endpoint, JsonPayload};
pub use response::ApiResponse;
pub use upload::UploadFile;
