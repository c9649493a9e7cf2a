use crate::membership::MembershipGrid;

/// Closed exterior ring in pixel-corner coordinates, (col, row) order.
/// First and last vertex are identical; collinear vertices are collapsed.
pub type PixelRing = Vec<(usize, usize)>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dir {
    East,
    South,
    West,
    North,
}

impl Dir {
    // Screen orientation: x grows with columns, y grows with rows.
    fn left(self) -> Dir {
        match self {
            Dir::East => Dir::North,
            Dir::North => Dir::West,
            Dir::West => Dir::South,
            Dir::South => Dir::East,
        }
    }

    fn right(self) -> Dir {
        match self {
            Dir::East => Dir::South,
            Dir::South => Dir::West,
            Dir::West => Dir::North,
            Dir::North => Dir::East,
        }
    }

    fn step(self, (x, y): (usize, usize)) -> (usize, usize) {
        match self {
            Dir::East => (x + 1, y),
            Dir::South => (x, y + 1),
            Dir::West => (x - 1, y),
            Dir::North => (x, y - 1),
        }
    }
}

struct Labels {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl Labels {
    /// Component label at (row, col); out of range counts as background.
    fn get(&self, row: isize, col: isize) -> u32 {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return 0;
        }
        self.cells[row as usize * self.width + col as usize]
    }
}

/// Traces the exterior ring of every 8-connected region of 1-valued cells,
/// in row-major discovery order.
///
/// Only exterior rings are reported; interior holes of a region are not
/// traced. Rings walk the pixel edges clockwise in row/col space, which is
/// counterclockwise on the ground for the usual north-up transform.
pub fn trace_regions(grid: &MembershipGrid) -> Vec<PixelRing> {
    let (labels, seeds) = label_components(grid);

    seeds
        .iter()
        .enumerate()
        .map(|(i, &seed)| trace_ring(&labels, (i + 1) as u32, seed))
        .collect()
}

/// Labels 8-connected components of member cells. Returns the label grid
/// (0 = background) and the first scan-order cell of each component.
fn label_components(grid: &MembershipGrid) -> (Labels, Vec<(usize, usize)>) {
    let (height, width) = grid.shape();
    let mut labels = Labels {
        width,
        height,
        cells: vec![0; width * height],
    };
    let mut seeds = Vec::new();

    for row in 0..height {
        for col in 0..width {
            if !grid.is_member(row as isize, col as isize) || labels.cells[row * width + col] != 0
            {
                continue;
            }

            let id = (seeds.len() + 1) as u32;
            seeds.push((row, col));

            let mut stack = vec![(row, col)];
            labels.cells[row * width + col] = id;

            while let Some((r, c)) = stack.pop() {
                for dr in -1isize..=1 {
                    for dc in -1isize..=1 {
                        let (nr, nc) = (r as isize + dr, c as isize + dc);
                        if grid.is_member(nr, nc) && labels.get(nr, nc) == 0 {
                            labels.cells[nr as usize * width + nc as usize] = id;
                            stack.push((nr as usize, nc as usize));
                        }
                    }
                }
            }
        }
    }

    (labels, seeds)
}

/// Walks the exterior boundary of one component, starting from the top-left
/// corner of its first scan-order cell and keeping the region on the right.
///
/// At each vertex the 2x2 cell neighborhood decides the next move; when a
/// diagonal saddle allows two moves, the left turn is taken so that corner-
/// touching cells stay sewn into a single ring (8-connectivity).
fn trace_ring(labels: &Labels, id: u32, seed: (usize, usize)) -> PixelRing {
    let inside = |row: isize, col: isize| -> bool { labels.get(row, col) == id };

    // Seed is first in scan order, so its top-left corner is on the boundary.
    let start = (seed.1, seed.0);
    let mut ring = vec![start];

    let mut pos = start;
    let mut dir = Dir::East;

    loop {
        pos = dir.step(pos);
        if pos == start {
            ring.push(start);
            return ring;
        }

        let (x, y) = (pos.0 as isize, pos.1 as isize);
        let walkable = |d: Dir| -> bool {
            match d {
                Dir::East => inside(y, x) && !inside(y - 1, x),
                Dir::South => inside(y, x - 1) && !inside(y, x),
                Dir::West => inside(y - 1, x - 1) && !inside(y, x - 1),
                Dir::North => inside(y - 1, x) && !inside(y - 1, x - 1),
            }
        };

        let next = [dir.left(), dir, dir.right()]
            .into_iter()
            .find(|&d| walkable(d))
            .expect("boundary edge always has a successor");

        if next != dir {
            ring.push(pos);
        }
        dir = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize, values: &[u8]) -> MembershipGrid {
        MembershipGrid::new(width, height, values.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_grid_has_no_rings() {
        let rings = trace_regions(&grid(4, 4, &[0; 16]));
        assert!(rings.is_empty());
    }

    #[test]
    fn test_single_cell_ring() {
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            0, 0, 0,
            0, 1, 0,
            0, 0, 0,
        ]);

        let rings = trace_regions(&g);

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0], vec![(1, 1), (2, 1), (2, 2), (1, 2), (1, 1)]);
    }

    #[test]
    fn test_centered_block_collapses_collinear_vertices() {
        #[rustfmt::skip]
        let g = grid(4, 4, &[
            0, 0, 0, 0,
            0, 1, 1, 0,
            0, 1, 1, 0,
            0, 0, 0, 0,
        ]);

        let rings = trace_regions(&g);

        assert_eq!(rings.len(), 1);
        // 4 corners + closing vertex, no intermediate edge vertices
        assert_eq!(rings[0], vec![(1, 1), (3, 1), (3, 3), (1, 3), (1, 1)]);
    }

    #[test]
    fn test_diagonal_pair_is_one_region() {
        #[rustfmt::skip]
        let g = grid(2, 2, &[
            1, 0,
            0, 1,
        ]);

        let rings = trace_regions(&g);

        assert_eq!(rings.len(), 1);

        let ring = &rings[0];
        assert_eq!(ring.first(), ring.last());
        // The shared corner is a pinch point the ring passes through twice.
        let pinch = ring.iter().filter(|&&v| v == (1, 1)).count();
        assert_eq!(pinch, 2);
        // 8 unit edges around the two cells, every vertex is a turn
        assert_eq!(ring.len(), 9);
    }

    #[test]
    fn test_disjoint_regions_in_scan_order() {
        #[rustfmt::skip]
        let g = grid(5, 3, &[
            1, 0, 0, 0, 1,
            0, 0, 0, 0, 1,
            0, 0, 0, 0, 0,
        ]);

        let rings = trace_regions(&g);

        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0][0], (0, 0));
        assert_eq!(rings[1][0], (4, 0));
        // Second region is a 1x2 column
        assert_eq!(rings[1], vec![(4, 0), (5, 0), (5, 2), (4, 2), (4, 0)]);
    }

    #[test]
    fn test_concave_region_single_ring() {
        #[rustfmt::skip]
        let g = grid(3, 3, &[
            1, 1, 1,
            1, 0, 0,
            1, 1, 1,
        ]);

        let rings = trace_regions(&g);

        assert_eq!(rings.len(), 1);
        assert_eq!(
            rings[0],
            vec![
                (0, 0),
                (3, 0),
                (3, 1),
                (1, 1),
                (1, 2),
                (3, 2),
                (3, 3),
                (0, 3),
                (0, 0)
            ]
        );
    }
}
