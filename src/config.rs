use std::cell::RefCell;

use rand::Rng;
use serde::Deserialize;

/// Options controlling how a download is named and typed.
/// Every field is optional when deserialising from JS.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadOptions {
    pub mime_type: String,
    pub file_prefix: String,
    pub file_extension: String,
    /// Exclusive upper bound of the random filename suffix
    pub max_suffix: u32,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            mime_type: "image/png".to_string(),
            file_prefix: "out".to_string(),
            file_extension: "png".to_string(),
            max_suffix: 99999,
        }
    }
}

impl DownloadOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_suffix == 0 {
            return Err("maxSuffix must be at least 1".to_string());
        }
        if self.mime_type.is_empty() {
            return Err("mimeType must not be empty".to_string());
        }
        if self.file_extension.is_empty() {
            return Err("fileExtension must not be empty".to_string());
        }
        Ok(())
    }

    /// Generate a filename like `out4711.png`. Collisions between calls are possible.
    pub fn filename<R: Rng>(&self, rng: &mut R) -> String {
        let suffix = rng.random_range(0..self.max_suffix.max(1));
        format!("{}{}.{}", self.file_prefix, suffix, self.file_extension)
    }
}

thread_local! {
    static DOWNLOAD_OPTIONS: RefCell<DownloadOptions> =
        RefCell::new(DownloadOptions::default());
}

/// Replace the options used by registrations made after this call
pub fn set_options(options: DownloadOptions) -> Result<(), String> {
    options.validate()?;
    DOWNLOAD_OPTIONS.with(|o| *o.borrow_mut() = options);
    Ok(())
}

pub fn current_options() -> DownloadOptions {
    DOWNLOAD_OPTIONS.with(|o| o.borrow().clone())
}
