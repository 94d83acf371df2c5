pub mod animation;
pub mod document;
pub mod element;
pub mod layout;
pub mod render;
pub mod renderer;
pub mod stylesheet;
pub mod text;
pub mod transitions;
pub mod types;

pub use document::Document;
pub use element::{find_element, Content, Element, Tag};
pub use layout::Metrics;
pub use renderer::{LiveNode, Renderer, RendererConfig};
pub use stylesheet::{ComputedStyle, Rule, Stylesheet};
pub use transitions::{Easing, TransitionConfig, TransitionTiming};
pub use types::*;
