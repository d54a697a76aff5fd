//! Point buffers produced by the generators.

/// Positions plus optional per-point colors, index-aligned.
///
/// Point `i`'s color (when present) is `colors[i]`. Clouds drawn with a single
/// material color carry `colors: None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointBuffer {
    pub positions: Vec<[f32; 3]>,
    pub colors: Option<Vec<[f32; 3]>>,
}

impl PointBuffer {
    /// Empty buffer with room for `count` colored points.
    pub fn with_colors(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Some(Vec::with_capacity(count)),
        }
    }

    /// Empty buffer with room for `count` flat-colored points.
    pub fn positions_only(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: None,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` slice.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat `r, g, b, r, g, b, ...` slice, if per-point colors exist.
    pub fn flat_colors(&self) -> Option<&[f32]> {
        self.colors.as_deref().map(bytemuck::cast_slice)
    }

    /// Append a colored point. Panics in debug builds if the buffer is flat-colored.
    pub(crate) fn push_colored(&mut self, position: [f32; 3], color: [f32; 3]) {
        debug_assert!(self.colors.is_some(), "push_colored on a positions-only buffer");
        self.positions.push(position);
        if let Some(colors) = self.colors.as_mut() {
            colors.push(color);
        }
    }

    pub(crate) fn push_position(&mut self, position: [f32; 3]) {
        self.positions.push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_views_have_three_floats_per_point() {
        let mut buffer = PointBuffer::with_colors(2);
        buffer.push_colored([1.0, 2.0, 3.0], [0.1, 0.2, 0.3]);
        buffer.push_colored([4.0, 5.0, 6.0], [0.4, 0.5, 0.6]);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.flat_positions(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(buffer.flat_colors().map(|c| c.len()), Some(6));
    }

    #[test]
    fn positions_only_has_no_colors() {
        let mut buffer = PointBuffer::positions_only(1);
        buffer.push_position([0.0; 3]);
        assert!(buffer.flat_colors().is_none());
        assert!(!buffer.is_empty());
    }
}
