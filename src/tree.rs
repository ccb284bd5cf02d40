use serde::{Serialize, Deserialize};
use crate::document::{DecodedLayer, Document};
use crate::surface::transcode;
use crate::types::{ColorMode, LayerError, Section};

/// One materialized layer. Owns its pixel buffer and its children outright;
/// nothing is borrowed from the decoded document.
#[derive(Serialize, Deserialize, Clone)]
pub struct LayerNode {
    pub name: String,
    pub blend_mode: String,
    pub opacity: u8,
    pub clipping: bool,
    pub blend_clipped_elements: bool,
    pub transparency_protected: bool,
    pub visible: bool,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub folder: bool,
    pub folder_open: bool,
    /// Interleaved RGBA, `width * height * 4` bytes. Present only for layers
    /// that declare raster content and cover a non-zero area.
    pub pixels: Option<Vec<u8>>,
    pub children: Vec<LayerNode>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct RootNode {
    pub width: u32,
    pub height: u32,
    pub children: Vec<LayerNode>,
}

impl RootNode {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Materializes the whole document in one pass. Expects a document whose
/// section markers and visibility have already been resolved (see
/// [`Document::resolve_sections`]). Fail-fast: the first bad layer aborts the
/// build and no tree is returned.
pub fn build(document: &Document) -> Result<RootNode, LayerError> {
    if document.color_mode != ColorMode::Rgb {
        return Err(LayerError::UnsupportedColorMode { mode: document.color_mode });
    }
    let mut children = Vec::with_capacity(document.layers.len());
    for layer in &document.layers {
        children.push(build_layer(layer)?);
    }
    Ok(RootNode {
        width: document.width,
        height: document.height,
        children,
    })
}

fn build_layer(layer: &DecodedLayer) -> Result<LayerNode, LayerError> {
    let pixels = if layer.has_image && layer.area() > 0 {
        Some(transcode(layer)?)
    } else {
        None
    };
    let mut children = Vec::with_capacity(layer.children.len());
    for child in &layer.children {
        children.push(build_layer(child)?);
    }
    Ok(LayerNode {
        name: layer.name.clone(),
        blend_mode: layer.blend_mode.clone(),
        opacity: layer.opacity,
        clipping: layer.clipping,
        blend_clipped_elements: layer.blend_clipped_elements,
        transparency_protected: layer.transparency_protected,
        visible: layer.visible,
        x: layer.x,
        y: layer.y,
        width: layer.width,
        height: layer.height,
        folder: layer.section.is_folder(),
        folder_open: layer.section == Section::FolderOpen,
        pixels,
        children,
    })
}
