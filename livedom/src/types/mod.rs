mod edges;
mod enums;
mod style;

pub use edges::Edges;
pub use enums::{Height, Overflow};
pub use style::Style;
