use std::path::PathBuf;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use super::{PendingDownload, SaveFile};

// Producers may or may not pad their output
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Writes downloads into a directory instead of going through a browser.
pub struct FileSystemDownload {
    dir: PathBuf,
}

impl FileSystemDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveFile for FileSystemDownload {
    fn save_bytes_as_file(&self, download: &PendingDownload) -> Result<(), String> {
        let bytes = LENIENT
            .decode(download.payload.as_bytes())
            .map_err(|e| format!("{}: invalid base64 payload: {}", download.filename, e))?;

        let path = self.dir.join(&download.filename);
        std::fs::write(&path, bytes)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}
