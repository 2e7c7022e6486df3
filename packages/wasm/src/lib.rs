use signet_compiler_html::{render_with_options, RenderOptions};
use signet_document::SignatureDocument;
use signet_editor::Pipeline;
use signet_stamp::{Stamp, Stamper};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {err}"))
}

#[wasm_bindgen]
pub struct StampResult {
    inner: Stamp,
}

#[wasm_bindgen]
impl StampResult {
    #[wasm_bindgen(getter)]
    pub fn hash(&self) -> String {
        self.inner.hash.clone()
    }

    #[wasm_bindgen(getter, js_name = shortHash)]
    pub fn short_hash(&self) -> String {
        self.inner.short_hash.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn timestamp(&self) -> String {
        self.inner.timestamp.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.inner.message.clone()
    }

    #[wasm_bindgen(getter, js_name = augmentedHtml)]
    pub fn augmented_html(&self) -> String {
        self.inner.augmented_html.clone()
    }
}

/// Serialized empty document
#[wasm_bindgen(js_name = newDocument)]
pub fn new_document_js(name: &str) -> Result<String, JsValue> {
    SignatureDocument::new(name)
        .to_json()
        .map_err(|e| js_error("Serialization error", e))
}

fn render_json(document_json: &str, pretty: bool) -> Result<String, String> {
    let doc = SignatureDocument::from_json(document_json).map_err(|e| e.to_string())?;
    let options = RenderOptions {
        pretty,
        ..Default::default()
    };
    Ok(render_with_options(&doc, &options))
}

/// Render a serialized document to email HTML
#[wasm_bindgen(js_name = renderSignature)]
pub fn render_signature_js(document_json: &str, pretty: bool) -> Result<String, JsValue> {
    render_json(document_json, pretty).map_err(|e| js_error("Document error", e))
}

/// Stamp rendered HTML for export
#[wasm_bindgen(js_name = stampSignature)]
pub fn stamp_signature_js(html: &str, author: &str) -> Result<StampResult, JsValue> {
    Stamper::new()
        .stamp(html, author)
        .map(|inner| StampResult { inner })
        .map_err(|e| js_error("Stamp error", e))
}

/// Whether stamped HTML still matches its digest
#[wasm_bindgen(js_name = verifyStamp)]
pub fn verify_stamp_js(html: &str) -> Result<bool, JsValue> {
    Stamper::new()
        .verify(html)
        .map(|v| v.is_valid())
        .map_err(|e| js_error("Stamp error", e))
}

/// Editing session for a browser editor: mutations in, preview HTML out
#[wasm_bindgen]
pub struct SignatureEditor {
    pipeline: Pipeline,
}

impl SignatureEditor {
    fn apply_inner(&mut self, mutation_json: &str) -> Result<Option<String>, String> {
        self.pipeline
            .apply_json(mutation_json)
            .map(|result| result.created)
            .map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl SignatureEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str) -> SignatureEditor {
        SignatureEditor {
            pipeline: Pipeline::new(SignatureDocument::new(name)),
        }
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(document_json: &str) -> Result<SignatureEditor, JsValue> {
        Pipeline::from_json(document_json)
            .map(|pipeline| SignatureEditor { pipeline })
            .map_err(|e| js_error("Document error", e))
    }

    /// Apply a JSON mutation; returns the id of the created node, if any
    pub fn apply(&mut self, mutation_json: &str) -> Result<Option<String>, JsValue> {
        self.apply_inner(mutation_json)
            .map_err(|e| js_error("Edit rejected", e))
    }

    pub fn undo(&mut self) -> bool {
        self.pipeline.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.pipeline.redo().is_some()
    }

    #[wasm_bindgen(js_name = beginBatch)]
    pub fn begin_batch(&mut self, description: &str) {
        self.pipeline.begin_batch(description);
    }

    #[wasm_bindgen(js_name = endBatch)]
    pub fn end_batch(&mut self) {
        self.pipeline.end_batch();
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.pipeline.history().can_undo()
    }

    #[wasm_bindgen(getter, js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.pipeline.history().can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u64 {
        self.pipeline.version()
    }

    /// Current preview HTML
    pub fn html(&mut self) -> String {
        match self.pipeline.last_html() {
            Some(html) => html.to_string(),
            None => self.pipeline.full_render(),
        }
    }

    #[wasm_bindgen(js_name = documentJson)]
    pub fn document_json(&self) -> Result<String, JsValue> {
        self.pipeline
            .document()
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }
}
