use std::fmt;

use crate::error::PolygonizeError;

/// Row-major binary grid marking which pixels belong to the catchment.
///
/// Values are validated to be 0 or 1 at construction time, so downstream
/// code never has to re-check cell contents.
#[derive(Debug, Clone)]
pub struct MembershipGrid {
    width: usize,
    height: usize,
    buffer: Vec<u8>,
}

impl MembershipGrid {
    pub fn new(width: usize, height: usize, buffer: Vec<u8>) -> Result<Self, PolygonizeError> {
        if buffer.len() != width * height {
            return Err(PolygonizeError::ShapeMismatch {
                expected: (height, width),
                actual: (buffer.len() / width.max(1), width),
            });
        }

        for (i, &value) in buffer.iter().enumerate() {
            if value > 1 {
                return Err(PolygonizeError::MembershipValue {
                    row: i / width,
                    col: i % width,
                    value,
                });
            }
        }

        Ok(MembershipGrid {
            width,
            height,
            buffer,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// True when the cell at (row, col) belongs to the catchment. Out of
    /// range coordinates count as outside.
    pub fn is_member(&self, row: isize, col: isize) -> bool {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return false;
        }
        self.buffer[row as usize * self.width + col as usize] == 1
    }

    pub fn member_count(&self) -> usize {
        self.buffer.iter().filter(|&&v| v == 1).count()
    }
}

impl fmt::Display for MembershipGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Width: {}\nHeight: {}\nMember pixels: {} / {}",
            self.width,
            self.height,
            self.member_count(),
            self.buffer.len(),
        )
    }
}
