use wasm_bindgen::prelude::*;

pub mod config;
pub mod console;
pub mod download;
pub mod js_interop;
pub mod plugin;

use config::DownloadOptions;
use download::AnchorDownload;
use plugin::{ClickHook, document, install_click_hook, plugin_descriptor};

/// Runs when the module is instantiated: hooks up logging, the (inert) click
/// handler, and hands our `register_plugin` to miniquad.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsError> {
    console::init();

    install_click_hook(&document().map_err(|e| JsError::new(&e))?, ClickHook::default());
    js_interop::miniquad_add_plugin(&plugin_descriptor().map_err(|e| JsError::new(&e))?);

    tracing::debug!("png download plugin added");
    Ok(())
}

/// Replace the download options, e.g. `configure({ filePrefix: "drawing-" })`.
/// Only affects registrations made afterwards.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsError> {
    let options: DownloadOptions = serde_wasm_bindgen::from_value(options)?;
    config::set_options(options).map_err(|e| JsError::new(&e))
}

/// Download raw PNG bytes directly, without going through a JsObject handle
#[wasm_bindgen]
pub fn save_png(bytes: &[u8]) -> Result<(), JsError> {
    let saver = AnchorDownload::new(document().map_err(|e| JsError::new(&e))?);
    download::save_bytes(bytes, saver, config::current_options()).map_err(|e| JsError::new(&e))
}
