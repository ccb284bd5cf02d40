use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use js_sys::Uint8Array;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};
use crate::document::Document;
use crate::tree::{self, LayerNode};

/// Boundary entry point: takes a decoded document from the host, resolves the
/// flat section markers, builds the surface tree, and hands it back as a
/// structured value. Errors come back as strings naming the failing layer.
#[wasm_bindgen]
pub fn materialize(document: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();
    let document: Document = serde_wasm_bindgen::from_value(document)
        .map_err(|e| JsValue::from_str(&format!("invalid document: {}", e)))?;
    let document = document.resolve_sections();
    let root = tree::build(&document).map_err(|e| JsValue::from_str(&format!("{:?}", e)))?;
    serde_wasm_bindgen::to_value(&root).map_err(JsValue::from)
}

/// Pushes one node's pixel buffer into a freshly created canvas sized to the
/// node's bounds. The node must carry pixels.
pub fn commit_to_canvas(node: &LayerNode) -> Result<HtmlCanvasElement, JsValue> {
    let pixels = node
        .pixels
        .as_deref()
        .ok_or_else(|| JsValue::from_str("layer has no pixel buffer"))?;
    let dom = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = dom.create_element("canvas")?.dyn_into()?;
    canvas.set_width(node.width);
    canvas.set_height(node.height);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels), node.width, node.height)?;
    ctx.put_image_data(&image, 0.0, 0.0)?;
    Ok(canvas)
}

pub fn pixels_as_array(node: &LayerNode) -> Option<Uint8Array> {
    node.pixels.as_deref().map(Uint8Array::from)
}
