//! Filename-based collection routing. The extension is the only signal:
//! image extensions go to the image collection, document-like extensions to
//! the document collection, everything else is treated as saved source code.

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "csv", "xls", "xlsx", "txt", "json",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Code,
    Images,
    Documents,
}

impl Collection {
    pub fn from_filename(filename: &str) -> Self {
        let ext = extension(filename);
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Collection::Images
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            Collection::Documents
        } else {
            Collection::Code
        }
    }

    /// Name of the backing collection in the store.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Code => "codes",
            Collection::Images => "images",
            Collection::Documents => "documents",
        }
    }

    /// Content type used when serving downloads from this collection.
    pub fn content_type(&self) -> &'static str {
        match self {
            Collection::Images => "image/png",
            Collection::Code | Collection::Documents => "text/plain",
        }
    }
}

pub fn extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Language tag for a saved code artifact, derived from its filename.
pub fn language_from_filename(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_string()
}
