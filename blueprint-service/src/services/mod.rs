pub mod image_meta;
pub mod multipart;
pub mod normalizer;
pub mod providers;

pub use multipart::{extract, extract_form, ExtractionError, UploadForm, UploadedFile};
pub use normalizer::{normalize, Fallback, ModelResult};
pub use providers::{InvocationError, ModelInvoker, ModelMessage};
