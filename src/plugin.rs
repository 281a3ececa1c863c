use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::current_options;
use crate::download::{AnchorDownload, DownloadTrigger, PayloadResolver, SaveFile};
use crate::js_interop::consume_js_object;

/// Name of the import the binary module links against
pub const IMPORT_NAME: &str = "hi_from_wasm";

pub type ImportFn<H> = Box<dyn Fn(H) -> Result<(), String>>;

/// Something functions can be imported from, usually `importObject.env`.
pub trait ImportNamespace {
    type Handle;

    /// Defining a name twice replaces the earlier function.
    fn define(&mut self, name: &str, function: ImportFn<Self::Handle>) -> Result<(), String>;
}

fn import_fn<R, S>(trigger: DownloadTrigger<R, S>) -> ImportFn<R::Handle>
where
    R: PayloadResolver + 'static,
    S: SaveFile + 'static,
{
    Box::new(move |handle| trigger.trigger_download(handle))
}

/// Install `hi_from_wasm` into the namespace. Safe to call more than once; the last call wins.
pub fn register_plugin<N, R, S>(
    namespace: &mut N,
    trigger: DownloadTrigger<R, S>,
) -> Result<(), String>
where
    N: ImportNamespace<Handle = R::Handle>,
    R: PayloadResolver + 'static,
    S: SaveFile + 'static,
{
    namespace.define(IMPORT_NAME, import_fn(trigger))
}

/// The `env` object of a WebAssembly import object.
pub struct EnvNamespace {
    env: Object,
}

impl EnvNamespace {
    /// Uses `importObject.env`, creating it when absent
    pub fn from_import_object(import_object: &JsValue) -> Result<Self, String> {
        let key = JsValue::from_str("env");
        let env = Reflect::get(import_object, &key)
            .map_err(|e| format!("Failed to read importObject.env: {:?}", e))?;

        let env = if env.is_undefined() || env.is_null() {
            let env = Object::new();
            Reflect::set(import_object, &key, &env)
                .map_err(|e| format!("Failed to create importObject.env: {:?}", e))?;
            env
        } else {
            env.dyn_into::<Object>()
                .map_err(|_| "importObject.env is not an object".to_string())?
        };

        Ok(Self { env })
    }
}

impl ImportNamespace for EnvNamespace {
    type Handle = JsValue;

    fn define(&mut self, name: &str, function: ImportFn<JsValue>) -> Result<(), String> {
        // Errors are thrown back into whichever JS frame made the call
        let closure = Closure::<dyn Fn(JsValue) -> Result<(), JsValue>>::new(
            move |handle: JsValue| function(handle).map_err(|e| JsValue::from(JsError::new(&e))),
        );

        Reflect::set(&self.env, &JsValue::from_str(name), &closure.into_js_value())
            .map(|_| ())
            .map_err(|e| format!("Failed to define {}: {:?}", name, e))
    }
}

/// Resolves sapp-jsutils `JsObject` handles through the page's `consume_js_object`.
pub struct JsObjectResolver;

impl PayloadResolver for JsObjectResolver {
    type Handle = JsValue;

    fn resolve_payload(&self, handle: JsValue) -> Result<String, String> {
        consume_js_object(&handle)
            .map_err(|e| format!("Failed to consume js object: {:?}", e))?
            .as_string()
            .ok_or_else(|| "Payload is not a string".to_string())
    }
}

pub fn document() -> Result<Document, String> {
    let window = web_sys::window().ok_or("No window object")?;
    window.document().ok_or_else(|| "No document object".to_string())
}

/// What `register_plugin` does when miniquad hands us its import object
pub fn register_download_import(import_object: &JsValue) -> Result<(), String> {
    let mut env = EnvNamespace::from_import_object(import_object)?;
    let saver = AnchorDownload::new(document()?);
    let trigger = DownloadTrigger::new(JsObjectResolver, saver, current_options());
    register_plugin(&mut env, trigger)
}

/// Builds `{ register_plugin }` for `miniquad_add_plugin`. `on_init` is left out.
pub fn plugin_descriptor() -> Result<Object, String> {
    let register = Closure::<dyn Fn(JsValue) -> Result<(), JsValue>>::new(
        |import_object: JsValue| {
            register_download_import(&import_object).map_err(|e| JsValue::from(JsError::new(&e)))
        },
    );

    let descriptor = Object::new();
    Reflect::set(&descriptor, &JsValue::from_str("register_plugin"), &register.into_js_value())
        .map_err(|e| format!("Failed to build plugin descriptor: {:?}", e))?;
    Ok(descriptor)
}

/// Extension point for forwarding page clicks into the binary module.
/// Does nothing unless a callback is supplied.
#[derive(Default)]
pub struct ClickHook {
    callback: Option<Box<dyn Fn()>>,
}

impl ClickHook {
    pub fn new(callback: impl Fn() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn fire(&self) {
        if let Some(callback) = &self.callback {
            callback();
        }
    }
}

pub fn install_click_hook(document: &Document, hook: ClickHook) {
    let closure = Closure::<dyn Fn()>::new(move || hook.fire());
    let handler = closure.into_js_value();
    document.set_onclick(Some(handler.unchecked_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DownloadOptions;
    use crate::download::anchor::tests::{DomEvent, MockDocument};
    use crate::download::InlinePayload;
    use crate::download::tests::RecordingSaver;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct MockNamespace {
        functions: HashMap<String, ImportFn<String>>,
    }

    impl ImportNamespace for MockNamespace {
        type Handle = String;

        fn define(&mut self, name: &str, function: ImportFn<String>) -> Result<(), String> {
            self.functions.insert(name.to_string(), function);
            Ok(())
        }
    }

    #[test]
    fn test_registration_exposes_import() {
        let mut env = MockNamespace::default();
        let saver = RecordingSaver::default();
        let trigger = DownloadTrigger::new(InlinePayload, saver.clone(), Default::default());

        register_plugin(&mut env, trigger).unwrap();

        assert_eq!(env.functions.len(), 1);
        let hi_from_wasm = &env.functions[IMPORT_NAME];
        hi_from_wasm("AAAA".to_string()).unwrap();
        assert_eq!(saver.saved.borrow()[0].href(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_registering_twice_last_wins() {
        let mut env = MockNamespace::default();
        let first = RecordingSaver::default();
        let second = RecordingSaver::default();

        let options = DownloadOptions::default();
        let trigger = DownloadTrigger::new(InlinePayload, first.clone(), options.clone());
        register_plugin(&mut env, trigger).unwrap();
        let trigger = DownloadTrigger::new(InlinePayload, second.clone(), options);
        register_plugin(&mut env, trigger).unwrap();

        assert_eq!(env.functions.len(), 1);
        env.functions[IMPORT_NAME]("AAAA".to_string()).unwrap();
        assert!(first.saved.borrow().is_empty());
        assert_eq!(second.saved.borrow().len(), 1);
    }

    #[test]
    fn test_import_drives_anchor_download() {
        let document: &'static MockDocument = Box::leak(Box::new(MockDocument::default()));
        let mut env = MockNamespace::default();
        let saver = AnchorDownload::new(document);
        let trigger = DownloadTrigger::new(InlinePayload, saver, DownloadOptions::default());
        register_plugin(&mut env, trigger).unwrap();

        env.functions[IMPORT_NAME]("AAAA".to_string()).unwrap();

        let events = document.events.borrow();
        assert_eq!(events.len(), 7);
        assert_eq!(
            events[1],
            DomEvent::Attribute(0, "href".to_string(), "data:image/png;base64,AAAA".to_string())
        );
        assert!(document.body.borrow().is_empty());
    }

    #[test]
    fn test_default_click_hook_does_nothing() {
        let hook = ClickHook::default();
        assert!(hook.callback.is_none());
        hook.fire();
        hook.fire();
    }

    #[test]
    fn test_click_hook_forwards_clicks() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let hook = ClickHook::new(move || counter.set(counter.get() + 1));

        hook.fire();
        hook.fire();
        assert_eq!(clicks.get(), 2);
    }
}
