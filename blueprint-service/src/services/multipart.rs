//! Extraction of the uploaded blueprint from a `multipart/form-data` body.
//!
//! Only the first part that carries a `filename` disposition parameter is
//! treated as the upload; plain text fields are collected alongside it.

use bytes::Bytes;
use mime::Mime;
use std::collections::BTreeMap;
use thiserror::Error;

/// MIME type assumed when the file part does not declare one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Text fields above this size are not something a browser form sends.
const MAX_TEXT_FIELD_BYTES: u64 = 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("No data received")]
    NoData,

    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("No file found in request")]
    NoFile,
}

/// The file part of a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub mime_type: String,
    pub file_name: Option<String>,
    pub field_name: Option<String>,
}

/// The uploaded file plus every text field in the same body.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub file: UploadedFile,
    pub fields: BTreeMap<String, String>,
}

/// Return the first file part of `body`.
pub async fn extract(body: Bytes, content_type: &str) -> Result<UploadedFile, ExtractionError> {
    extract_form(body, content_type).await.map(|form| form.file)
}

/// Return the first file part of `body` together with its text fields.
///
/// Fields after the file part are still read so that callers can send
/// metadata in any order.
pub async fn extract_form(body: Bytes, content_type: &str) -> Result<UploadForm, ExtractionError> {
    if body.is_empty() {
        return Err(ExtractionError::NoData);
    }

    let boundary = parse_boundary(content_type)?;

    let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut file: Option<UploadedFile> = None;
    let mut fields = BTreeMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?
    {
        let field_name = field.name().map(str::to_string);
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        match file_name {
            Some(file_name) if file.is_none() => {
                let mime_type = field
                    .content_type()
                    .map(|mime| mime.essence_str().to_string())
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

                // An empty file part ends the search just like a missing one.
                if bytes.is_empty() {
                    return Err(ExtractionError::NoFile);
                }

                file = Some(UploadedFile {
                    bytes,
                    mime_type,
                    file_name: Some(file_name),
                    field_name,
                });
            }
            Some(_) => {
                // Additional files are drained but ignored.
                field
                    .bytes()
                    .await
                    .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
            }
            None => {
                let text = field
                    .bytes()
                    .await
                    .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
                if text.len() as u64 > MAX_TEXT_FIELD_BYTES {
                    return Err(ExtractionError::Malformed(format!(
                        "field '{}' exceeds {} bytes",
                        field_name.as_deref().unwrap_or(""),
                        MAX_TEXT_FIELD_BYTES
                    )));
                }
                if let Some(name) = field_name {
                    fields.insert(name, String::from_utf8_lossy(&text).into_owned());
                }
            }
        }
    }

    let file = file.ok_or(ExtractionError::NoFile)?;

    tracing::debug!(
        mime_type = %file.mime_type,
        bytes = file.bytes.len(),
        field_count = fields.len(),
        "Extracted multipart upload"
    );

    Ok(UploadForm { file, fields })
}

/// Boundary of any `multipart/*` Content-Type, not only `form-data`.
fn parse_boundary(content_type: &str) -> Result<String, ExtractionError> {
    let parsed: Mime = content_type
        .parse()
        .map_err(|e| ExtractionError::Malformed(format!("invalid Content-Type: {}", e)))?;

    if parsed.type_() != mime::MULTIPART {
        return Err(ExtractionError::Malformed(format!(
            "Content-Type is not multipart: {}",
            parsed.essence_str()
        )));
    }

    parsed
        .get_param(mime::BOUNDARY)
        .map(|b| b.as_str().to_string())
        .ok_or_else(|| ExtractionError::Malformed("Content-Type has no boundary".to_string()))
}
