//! CPU view of the depth-only pass output.

use crate::error::{CullError, CullResult};

/// Borrowed per-pixel depth data from the external depth pass.
///
/// Row-major, row 0 at the bottom of the viewport (GL readback order),
/// values in [0, 1] with 1.0 meaning "nothing written".
#[derive(Debug, Clone, Copy)]
pub struct DepthBuffer<'a> {
    data: &'a [f32],
    width: u32,
    height: u32,
}

impl<'a> DepthBuffer<'a> {
    pub fn new(data: &'a [f32], width: u32, height: u32) -> CullResult<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(CullError::DepthSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth at pixel (x, y). Callers stay in bounds; the culler clamps
    /// its tile rects to the viewport.
    pub fn sample(&self, x: u32, y: u32) -> f32 {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_length() {
        let data = vec![0.5; 10];
        let err = DepthBuffer::new(&data, 4, 4).unwrap_err();
        assert_eq!(
            err,
            CullError::DepthSizeMismatch {
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn test_sample_is_row_major() {
        let mut data = vec![0.0; 6];
        data[1 * 3 + 2] = 0.75;
        let depth = DepthBuffer::new(&data, 3, 2).expect("valid dimensions");
        assert_eq!(depth.sample(2, 1), 0.75);
        assert_eq!(depth.sample(0, 0), 0.0);
    }
}
