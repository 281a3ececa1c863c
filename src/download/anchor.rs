use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{PendingDownload, SaveFile};

/// The handful of DOM operations needed for the anchor-click download.
pub trait DownloadDocument {
    type Anchor;

    fn create_anchor(&self) -> Result<Self::Anchor, String>;
    fn set_attribute(&self, anchor: &Self::Anchor, name: &str, value: &str) -> Result<(), String>;
    /// Set `display: none` so the anchor is never rendered
    fn hide(&self, anchor: &Self::Anchor) -> Result<(), String>;
    fn append_to_body(&self, anchor: &Self::Anchor) -> Result<(), String>;
    fn click(&self, anchor: &Self::Anchor);
    fn remove_from_body(&self, anchor: &Self::Anchor) -> Result<(), String>;
}

/// Saves a file by clicking a hidden `<a download>` that points at a data URL.
pub struct AnchorDownload<D> {
    document: D,
}

impl<D: DownloadDocument> AnchorDownload<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }
}

impl<D: DownloadDocument> SaveFile for AnchorDownload<D> {
    fn save_bytes_as_file(&self, download: &PendingDownload) -> Result<(), String> {
        let anchor = self.document.create_anchor()?;
        self.document.set_attribute(&anchor, "href", &download.href())?;
        self.document.set_attribute(&anchor, "download", &download.filename)?;
        self.document.hide(&anchor)?;

        self.document.append_to_body(&anchor)?;
        // Whether the browser honours the click is not observable from here
        self.document.click(&anchor);
        self.document.remove_from_body(&anchor)
    }
}

fn body(document: &Document) -> Result<HtmlElement, String> {
    document.body().ok_or_else(|| "Document has no body".to_string())
}

impl DownloadDocument for Document {
    type Anchor = HtmlElement;

    fn create_anchor(&self) -> Result<HtmlElement, String> {
        self.create_element("a")
            .map_err(|e| format!("Failed to create anchor: {:?}", e))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| "Anchor is not an HtmlElement".to_string())
    }

    fn set_attribute(&self, anchor: &HtmlElement, name: &str, value: &str) -> Result<(), String> {
        anchor
            .set_attribute(name, value)
            .map_err(|e| format!("Failed to set {}: {:?}", name, e))
    }

    fn hide(&self, anchor: &HtmlElement) -> Result<(), String> {
        anchor
            .style()
            .set_property("display", "none")
            .map_err(|e| format!("Failed to hide anchor: {:?}", e))
    }

    fn append_to_body(&self, anchor: &HtmlElement) -> Result<(), String> {
        body(self)?
            .append_child(anchor)
            .map(|_| ())
            .map_err(|e| format!("Failed to append anchor: {:?}", e))
    }

    fn click(&self, anchor: &HtmlElement) {
        anchor.click();
    }

    fn remove_from_body(&self, anchor: &HtmlElement) -> Result<(), String> {
        body(self)?
            .remove_child(anchor)
            .map(|_| ())
            .map_err(|e| format!("Failed to remove anchor: {:?}", e))
    }
}
