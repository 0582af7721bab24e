//! Layout primitives

/// Padding around an element (top, right, bottom, left)
///
/// # Examples
///
/// ```ignore
/// // Equal padding on all sides (8px)
/// let p = Padding::all(8);
///
/// // Individual control: top=8, right=16, bottom=8, left=16
/// let p = Padding::new(8, 16, 8, 16);
///
/// let total_width = p.horizontal();  // left + right
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    /// Top padding (pixels)
    pub top: u32,

    /// Right padding (pixels)
    pub right: u32,

    /// Bottom padding (pixels)
    pub bottom: u32,

    /// Left padding (pixels)
    pub left: u32,
}

impl Padding {
    /// Creates equal padding on all sides
    pub fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Returns total horizontal padding (left + right)
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Returns total vertical padding (top + bottom)
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_totals() {
        let p = Padding::new(1, 2, 3, 4);
        assert_eq!(p.horizontal(), 6);
        assert_eq!(p.vertical(), 4);
        assert_eq!(Padding::all(5).horizontal(), 10);
        assert_eq!(Padding::default().vertical(), 0);
    }
}
