use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use tracing::debug;

use crate::config::DownloadOptions;

pub mod anchor;
pub mod filesystem;
pub mod types;

pub use anchor::{AnchorDownload, DownloadDocument};
pub use filesystem::FileSystemDownload;
pub use types::PendingDownload;

/// Turns an opaque handle from the host runtime into the base64 payload it refers to.
pub trait PayloadResolver {
    type Handle;

    fn resolve_payload(&self, handle: Self::Handle) -> Result<String, String>;
}

/// Platform capability that actually hands a file to the user.
pub trait SaveFile {
    fn save_bytes_as_file(&self, download: &PendingDownload) -> Result<(), String>;
}

/// Resolves a payload, names it and passes it to a [`SaveFile`] capability.
///
/// Holds no state between calls; every invocation is independent.
pub struct DownloadTrigger<R, S> {
    resolver: R,
    saver: S,
    options: DownloadOptions,
}

impl<R: PayloadResolver, S: SaveFile> DownloadTrigger<R, S> {
    pub fn new(resolver: R, saver: S, options: DownloadOptions) -> Self {
        Self {
            resolver,
            saver,
            options,
        }
    }

    pub fn trigger_download(&self, handle: R::Handle) -> Result<(), String> {
        self.trigger_download_with(handle, &mut rand::rng())
    }

    /// Failures from the resolver or the saver are returned unchanged.
    pub fn trigger_download_with<G: Rng>(
        &self,
        handle: R::Handle,
        rng: &mut G,
    ) -> Result<(), String> {
        debug!("download requested");

        let payload = self.resolver.resolve_payload(handle)?;
        let filename = self.options.filename(rng);
        let download = PendingDownload::new(payload, &self.options.mime_type, filename);
        debug!(
            filename = %download.filename,
            bytes = download.payload.len(),
            "payload resolved"
        );

        self.saver.save_bytes_as_file(&download)?;
        debug!(filename = %download.filename, "download triggered");

        Ok(())
    }
}

/// Resolver for payloads that are already base64 text
pub struct InlinePayload;

impl PayloadResolver for InlinePayload {
    type Handle = String;

    fn resolve_payload(&self, handle: String) -> Result<String, String> {
        Ok(handle)
    }
}

/// Encode raw bytes and download them through the usual trigger
pub fn save_bytes<S: SaveFile>(
    bytes: &[u8],
    saver: S,
    options: DownloadOptions,
) -> Result<(), String> {
    DownloadTrigger::new(InlinePayload, saver, options).trigger_download(STANDARD.encode(bytes))
}
