/// Box padding.
///
/// Vertical edges are measured in pixels, horizontal edges in text columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }

    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }
}
