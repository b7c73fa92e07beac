//! Shape definitions and symmetry expansion.
//!
//! A square grid admits 8 symmetries (the dihedral group of the square):
//! four rotations, plus a reflection followed by the same four rotations.
//! Each shape is expanded once, at catalog load, into its distinct images
//! under those symmetries. Symmetric shapes produce fewer than 8 images,
//! and the image count always divides 8 (it is an orbit size).

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

/// A (row, col) position on the grid, or a (dr, dc) offset within a shape.
pub type Cell = (i32, i32);

/// Character marking an occupied cell in a shape pattern.
pub const FILLED: char = '#';

/// A catalog shape: its drawn footprint plus all distinct orientations.
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: usize,
    /// Cells of the pattern as drawn, in reading order.
    cells: Vec<Cell>,
    /// Distinct normalized images under the 8 symmetries, in first-seen order.
    variations: Vec<Vec<Cell>>,
}

impl Shape {
    /// Parses a text pattern into a shape.
    ///
    /// Every [`FILLED`] character becomes a cell at its (row, col) position;
    /// any other character is background.
    pub fn parse(id: usize, pattern: &[&str]) -> Self {
        let cells: Vec<Cell> = pattern
            .iter()
            .enumerate()
            .flat_map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == FILLED)
                    .map(move |(col, _)| (row as i32, col as i32))
            })
            .collect();
        let variations = expand_variations(&cells);

        Self {
            id,
            cells,
            variations,
        }
    }

    /// Number of cells one placement of this shape covers.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// All distinct orientations, each a sorted list of (dr, dc) offsets
    /// whose first element is (0, 0).
    pub fn variations(&self) -> &[Vec<Cell>] {
        &self.variations
    }
}

/// Generates all distinct symmetry images of a cell set.
///
/// Applies the four rotations to the base cells, then to the reflected
/// cells, normalizing each image and keeping the first occurrence of every
/// distinct offset set.
fn expand_variations(cells: &[Cell]) -> Vec<Vec<Cell>> {
    if cells.is_empty() {
        return Vec::new();
    }

    let mut seen: FxHashSet<Vec<Cell>> = FxHashSet::default();
    let mut variations = Vec::new();

    collect_rotations(cells.to_vec(), &mut seen, &mut variations);
    let flipped = cells.iter().map(|&(r, c)| (r, -c)).collect();
    collect_rotations(flipped, &mut seen, &mut variations);

    variations
}

/// Adds the four rotations of `start` to `variations`, skipping duplicates.
///
/// One quarter turn maps (r, c) to (c, -r).
fn collect_rotations(
    start: Vec<Cell>,
    seen: &mut FxHashSet<Vec<Cell>>,
    variations: &mut Vec<Vec<Cell>>,
) {
    let mut current = start;
    for _ in 0..4 {
        let normalized = normalize(&current);
        if seen.insert(normalized.clone()) {
            variations.push(normalized);
        }
        current = current.iter().map(|&(r, c)| (c, -r)).collect();
    }
}

/// Normalizes an image so its reading-order-first cell becomes (0, 0).
///
/// The solver anchors every placement attempt at the first free cell of its
/// reading-order scan, so offsets relative to the reading-order-first cell
/// can be added to the anchor directly. Anchoring at the bounding-box corner
/// instead would require an extra shift on every placement attempt.
fn normalize(cells: &[Cell]) -> Vec<Cell> {
    let mut sorted = cells.to_vec();
    sorted.sort_unstable();
    let (base_r, base_c) = sorted[0];
    for (r, c) in &mut sorted {
        *r -= base_r;
        *c -= base_c;
    }
    sorted
}

/// An immutable shape collection keyed by id, iterated in ascending id order.
#[derive(Debug, Default)]
pub struct Catalog {
    shapes: BTreeMap<usize, Shape>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: Shape) {
        self.shapes.insert(shape.id, shape);
    }

    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shape ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.shapes.keys().copied()
    }

    /// Shapes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }
}
