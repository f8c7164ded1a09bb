//! A uniform bucket grid, for restricting neighbor searches to nearby particles. Cell size equals the
//! smoothing radius, so any pair closer than `h` is in the same or an adjacent cell.

use std::collections::HashMap;

use lin_alg::f64::Vec3;

use crate::Particle;

/// Integer cell coordinate: (⌊x/h⌋, ⌊y/h⌋)
pub type Cell = (i64, i64);

/// Rebuilt from scratch each step; not updated incrementally.
#[derive(Debug, Default)]
pub struct SpatialGrid {
    pub cell_size: f64,
    buckets: HashMap<Cell, Vec<usize>>,
}

impl SpatialGrid {
    /// Bucket every particle by its current position. Indices within a bucket are ascending.
    pub fn rebuild(particles: &[Particle], h: f64) -> Self {
        let mut buckets: HashMap<Cell, Vec<usize>> = HashMap::new();

        for (i, particle) in particles.iter().enumerate() {
            buckets
                .entry(cell_of(particle.posit, h))
                .or_default()
                .push(i);
        }

        Self {
            cell_size: h,
            buckets,
        }
    }

    pub fn cell_of(&self, posit: Vec3) -> Cell {
        cell_of(posit, self.cell_size)
    }

    /// Particle indices in a single bucket. Empty if no particles are there.
    pub fn bucket(&self, cell: Cell) -> &[usize] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All particles in the 3x3 block of buckets centered on `cell`, including `cell` itself.
    /// Callers must still filter on exact distance.
    pub fn neighbors_of(&self, cell: Cell) -> impl Iterator<Item = usize> + '_ {
        // Saturating, so a cell at the edge of the index range doesn't overflow. Duplicate cells
        // there are skipped, so each particle is still yielded once.
        let mut cells = Vec::with_capacity(9);
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                let c = (cell.0.saturating_add(dx), cell.1.saturating_add(dy));
                if !cells.contains(&c) {
                    cells.push(c);
                }
            }
        }

        cells
            .into_iter()
            .flat_map(|c| self.bucket(c).iter().copied())
    }

    /// Number of non-empty buckets.
    pub fn num_cells(&self) -> usize {
        self.buckets.len()
    }
}

/// Positions too far out for an `i64` index saturate to the edge cell.
pub fn cell_of(posit: Vec3, h: f64) -> Cell {
    ((posit.x / h).floor() as i64, (posit.y / h).floor() as i64)
}
