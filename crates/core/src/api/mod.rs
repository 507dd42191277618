//! Request execution: ports, classification, caching, and uploads

mod classifier;
mod executor;
mod fingerprint;
mod ports;
mod upload;

pub use self::classifier::classify;
pub use self::executor::RequestExecutor;
pub use self::fingerprint::fingerprint;
pub use self::ports::{
    CacheError, ContentTypeResolver, HttpTransport, NoopResponseCache, ResponseCache, StaticContentTypes,
};
pub use self::upload::{file_part, MultipartUploader};
