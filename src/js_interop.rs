use wasm_bindgen::prelude::*;

// Globals provided by miniquad's gl.js and sapp-jsutils on the host page
#[wasm_bindgen]
extern "C" {
    /// Accepts `{ register_plugin, on_init }`, both optional
    #[wasm_bindgen(js_name = miniquad_add_plugin)]
    pub fn miniquad_add_plugin(plugin: &js_sys::Object);

    /// Takes ownership of a JsObject handle passed out of the binary module
    #[wasm_bindgen(js_name = consume_js_object, catch)]
    pub fn consume_js_object(handle: &JsValue) -> Result<JsValue, JsValue>;
}
