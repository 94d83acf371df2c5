use std::fmt;

/// Height of a box. `Auto` sizes to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Height {
    #[default]
    Auto,
    Px(u16),
}

impl Height {
    /// The explicit pixel value, if any.
    pub const fn px(self) -> Option<u16> {
        match self {
            Height::Auto => None,
            Height::Px(px) => Some(px),
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Height::Auto => write!(f, "auto"),
            Height::Px(px) => write!(f, "{px}px"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
}
