pub mod types;
pub mod document;
pub mod surface;
pub mod tree;
pub mod bridge;

pub use types::*;
pub use document::{Document, DecodedLayer, nest_layers, resolve_visibility};
pub use surface::transcode;
pub use tree::{build, LayerNode, RootNode};
