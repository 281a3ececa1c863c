/// One download request: a base64 payload, its MIME type and the name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub payload: String,
    pub mime_type: String,
    pub filename: String,
}

impl PendingDownload {
    pub fn new(payload: String, mime_type: &str, filename: String) -> Self {
        Self {
            payload,
            mime_type: mime_type.to_string(),
            filename,
        }
    }

    /// Data URL for the anchor's `href`. The payload is inserted verbatim.
    pub fn href(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }
}
