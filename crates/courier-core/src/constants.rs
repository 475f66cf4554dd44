//! Fixed values that form part of the public contract of the service.

/// File name returned in place of a real upload whenever ingestion fails.
pub const BAD_ATTACHMENT_FILE_NAME: &str = "bad-attachment.png";

/// Bucket segment of the fallback object. Independent of the request's bucket.
pub const BAD_ATTACHMENT_BUCKET: &str = "attachments";

/// Extensions (lowercase, with leading dot) that get a thumbnail.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".ico", ".im", ".pcx", ".tga", ".tiff",
];

pub const THUMBNAIL_WIDTH: u32 = 256;
pub const THUMBNAIL_HEIGHT: u32 = 256;

/// Suffix inserted between the artifact id and the extension for thumbnails.
pub const THUMBNAIL_SUFFIX: &str = "-thumbnail";

/// Date format of the store path partition.
pub const DATE_PARTITION_FORMAT: &str = "%Y-%m-%d";

/// Returns true when an artifact with this extension gets a thumbnail.
pub fn is_thumbnail_extension(extension: &str) -> bool {
    let lower = extension.to_lowercase();
    THUMBNAIL_EXTENSIONS.contains(&lower.as_str())
}
