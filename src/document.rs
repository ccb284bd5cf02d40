use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::types::{ChannelId, ColorMode, Section};

/// One decoded layer record. On the wire this is flat: folder structure is
/// expressed through `section` markers and `children` is empty until
/// [`nest_layers`] resolves the markers into real nesting.
#[derive(Serialize, Deserialize, Clone)]
pub struct DecodedLayer {
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
    #[serde(default)]
    pub section: Section,
    #[serde(default)]
    pub color_mode: ColorMode,
    pub has_image: bool,
    #[serde(default)]
    pub channels: HashMap<ChannelId, Vec<u8>>,
    #[serde(default)]
    pub children: Vec<DecodedLayer>,
}

impl DecodedLayer {
    pub fn channel(&self, id: ChannelId) -> Option<&[u8]> {
        self.channels.get(&id).map(|plane| plane.as_slice())
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
    pub layers: Vec<DecodedLayer>,
}

impl Document {
    /// Turns a freshly decoded document (flat layer sequence with section
    /// markers, raw visibility flags) into the nested form the tree builder
    /// consumes.
    pub fn resolve_sections(mut self) -> Document {
        self.layers = nest_layers(std::mem::take(&mut self.layers));
        resolve_visibility(&mut self.layers, true);
        self
    }
}

/// Resolves the flat marker encoding into real nesting with an explicit stack
/// of child frames: a `Divider` opens a frame, a `FolderOpen`/`FolderClosed`
/// record closes the innermost frame and adopts it as children. Depth is
/// unbounded and record order is preserved. Unbalanced markers degrade to an
/// empty frame rather than failing.
pub fn nest_layers(flat: Vec<DecodedLayer>) -> Vec<DecodedLayer> {
    let mut stack: Vec<Vec<DecodedLayer>> = vec![Vec::new()];
    for mut layer in flat {
        match layer.section {
            Section::Divider => stack.push(Vec::new()),
            Section::FolderOpen | Section::FolderClosed => {
                layer.children = stack.pop().unwrap_or_default();
                if stack.is_empty() {
                    stack.push(Vec::new());
                }
                if let Some(frame) = stack.last_mut() {
                    frame.push(layer);
                }
            }
            Section::Normal => {
                if let Some(frame) = stack.last_mut() {
                    frame.push(layer);
                }
            }
        }
    }
    // Unclosed frames collapse back into the top level, innermost first.
    let mut layers = Vec::new();
    for frame in stack {
        layers.extend(frame);
    }
    layers
}

/// Folds ancestor visibility downward: a layer inside a hidden folder is
/// hidden no matter what its own flag says.
pub fn resolve_visibility(layers: &mut [DecodedLayer], parent_visible: bool) {
    for layer in layers {
        layer.visible = layer.visible && parent_visible;
        resolve_visibility(&mut layer.children, layer.visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, section: Section) -> DecodedLayer {
        DecodedLayer {
            name: name.to_string(),
            blend_mode: "Normal".to_string(),
            opacity: 255,
            clipping: false,
            blend_clipped_elements: true,
            transparency_protected: false,
            visible: true,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            section,
            color_mode: ColorMode::Rgb,
            has_image: false,
            channels: HashMap::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn nest_preserves_flat_order() {
        let flat = vec![
            record("a", Section::Normal),
            record("b", Section::Normal),
            record("c", Section::Normal),
        ];
        let nested = nest_layers(flat);
        let names: Vec<&str> = nested.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(nested.iter().all(|l| l.children.is_empty()));
    }

    #[test]
    fn nest_attaches_divider_span_as_children() {
        let flat = vec![
            record("below", Section::Normal),
            record("", Section::Divider),
            record("", Section::Divider),
            record("leaf", Section::Normal),
            record("inner", Section::FolderOpen),
            record("outer", Section::FolderClosed),
            record("above", Section::Normal),
        ];
        let nested = nest_layers(flat);
        assert_eq!(nested.len(), 3);
        assert_eq!(nested[0].name, "below");
        assert_eq!(nested[1].name, "outer");
        assert_eq!(nested[2].name, "above");
        assert_eq!(nested[1].children.len(), 1);
        assert_eq!(nested[1].children[0].name, "inner");
        assert_eq!(nested[1].children[0].children.len(), 1);
        assert_eq!(nested[1].children[0].children[0].name, "leaf");
    }

    #[test]
    fn nest_tolerates_unbalanced_markers() {
        // Folder close with no opening divider gets an empty child frame.
        let nested = nest_layers(vec![record("orphan", Section::FolderOpen)]);
        assert_eq!(nested.len(), 1);
        assert!(nested[0].children.is_empty());

        // Divider never closed: its contents fall back to the top level.
        let nested = nest_layers(vec![
            record("", Section::Divider),
            record("stray", Section::Normal),
        ]);
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].name, "stray");
    }

    #[test]
    fn hidden_folder_hides_descendants() {
        let mut folder = record("folder", Section::FolderClosed);
        folder.visible = false;
        let mut child = record("child", Section::Normal);
        let mut grandchild_holder = record("sub", Section::FolderOpen);
        grandchild_holder.children.push(record("grandchild", Section::Normal));
        child.children.push(grandchild_holder);
        folder.children.push(child);

        let mut layers = vec![folder, record("sibling", Section::Normal)];
        resolve_visibility(&mut layers, true);

        assert!(!layers[0].visible);
        assert!(!layers[0].children[0].visible);
        assert!(!layers[0].children[0].children[0].children[0].visible);
        assert!(layers[1].visible);
    }

    #[test]
    fn resolve_sections_runs_both_passes() {
        let hidden = {
            let mut l = record("group", Section::FolderClosed);
            l.visible = false;
            l
        };
        let doc = Document {
            width: 8,
            height: 8,
            color_mode: ColorMode::Rgb,
            layers: vec![
                record("", Section::Divider),
                record("member", Section::Normal),
                hidden,
            ],
        };
        let doc = doc.resolve_sections();
        assert_eq!(doc.layers.len(), 1);
        assert_eq!(doc.layers[0].children.len(), 1);
        assert!(!doc.layers[0].children[0].visible);
    }
}
