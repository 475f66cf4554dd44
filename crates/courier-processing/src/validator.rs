/// Validation errors for ingested artifacts
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid file extension: {0:?}")]
    InvalidExtension(String),
}

/// Artifact validator
///
/// Checks run before anything is uploaded. The extension check runs before acquisition
/// because the extension ends up in local file names and store keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactValidator;

impl ArtifactValidator {
    pub fn new() -> Self {
        Self
    }

    /// Reject zero-length artifacts.
    pub fn validate_file_size(&self, size: u64) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        Ok(())
    }

    /// Accept any extension that cannot move a file name out of its directory.
    ///
    /// Interior dots are fine (`.tar.gz`); path separators, `..` and control
    /// characters are not.
    pub fn validate_extension(&self, extension: &str) -> Result<(), ValidationError> {
        let escapes = extension.contains(['/', '\\'])
            || extension.contains("..")
            || extension.chars().any(char::is_control);

        if escapes {
            return Err(ValidationError::InvalidExtension(extension.to_string()));
        }

        Ok(())
    }
}
