//! Text format parsing for shape catalogs and puzzle lists.
//!
//! The input interleaves two kinds of blocks, separated by blank lines:
//!
//! ```text
//! 0:
//! ##
//! #.
//!
//! 1:
//! ####
//!
//! 4x3: 2 1
//! ```
//!
//! A line `N:` opens shape `N`, followed by its pattern rows (`#` marks an
//! occupied cell, anything else is background). A line `WxH: c0 c1 ...`
//! declares a puzzle on a `W` x `H` grid; the counts align to the catalog's
//! shape ids in ascending order, zero meaning the shape is unused.
//!
//! All well-formedness checks live here: the board and solver assume parsed
//! inputs are valid.

use thiserror::Error;

use crate::board::Board;
use crate::shape::{Catalog, Shape};

/// A puzzle declaration: grid dimensions plus per-shape required counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub width: usize,
    pub height: usize,
    /// Required count per shape, aligned to ascending catalog id order.
    pub counts: Vec<usize>,
}

impl Puzzle {
    /// Builds the search board for this puzzle against `catalog`.
    pub fn board(&self, catalog: &Catalog) -> Board {
        let counts = catalog.ids().zip(self.counts.iter().copied());
        Board::new(self.width, self.height, counts)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: invalid shape id in header '{text}'")]
    BadShapeId {
        line: usize,
        text: String,
        source: std::num::ParseIntError,
    },
    #[error("line {line}: shape {id} declared twice")]
    DuplicateShape { line: usize, id: usize },
    #[error("line {line}: shape {id} has no '#' cells")]
    EmptyShape { line: usize, id: usize },
    #[error("line {line}: invalid number in '{text}'")]
    BadNumber {
        line: usize,
        text: String,
        source: std::num::ParseIntError,
    },
    #[error("line {line}: puzzle dimensions must be positive")]
    ZeroDimension { line: usize },
    #[error("line {line}: got {got} shape counts, catalog has {expected} shapes")]
    CountMismatch {
        line: usize,
        got: usize,
        expected: usize,
    },
    #[error("line {line}: unexpected line '{text}'")]
    UnexpectedLine { line: usize, text: String },
}

/// A shape header seen but not yet closed by a blank line or end of input.
struct OpenShape<'a> {
    line: usize,
    id: usize,
    rows: Vec<&'a str>,
}

/// Parses a whole input file into a shape catalog and its puzzle list.
pub fn parse(input: &str) -> Result<(Catalog, Vec<Puzzle>), ParseError> {
    let mut catalog = Catalog::new();
    let mut puzzles = Vec::new();
    let mut open: Option<OpenShape> = None;

    for (number, raw) in input.lines().enumerate() {
        let line = number + 1;
        let text = raw.trim_end();

        if text.is_empty() {
            close_shape(&mut open, &mut catalog)?;
        } else if let Some((prefix, rest)) = text.split_once(':') {
            close_shape(&mut open, &mut catalog)?;
            if prefix.contains('x') {
                puzzles.push(parse_puzzle(line, prefix, rest, catalog.len())?);
            } else if rest.trim().is_empty() {
                let id = prefix
                    .trim()
                    .parse()
                    .map_err(|source| ParseError::BadShapeId {
                        line,
                        text: text.to_string(),
                        source,
                    })?;
                if catalog.contains(id) {
                    return Err(ParseError::DuplicateShape { line, id });
                }
                open = Some(OpenShape {
                    line,
                    id,
                    rows: Vec::new(),
                });
            } else {
                return Err(ParseError::UnexpectedLine {
                    line,
                    text: text.to_string(),
                });
            }
        } else if let Some(shape) = &mut open {
            shape.rows.push(text);
        } else {
            return Err(ParseError::UnexpectedLine {
                line,
                text: text.to_string(),
            });
        }
    }
    close_shape(&mut open, &mut catalog)?;

    log::debug!(
        "parsed {} shapes and {} puzzles",
        catalog.len(),
        puzzles.len()
    );
    Ok((catalog, puzzles))
}

fn close_shape(open: &mut Option<OpenShape>, catalog: &mut Catalog) -> Result<(), ParseError> {
    if let Some(block) = open.take() {
        let shape = Shape::parse(block.id, &block.rows);
        if shape.area() == 0 {
            return Err(ParseError::EmptyShape {
                line: block.line,
                id: block.id,
            });
        }
        log::debug!("shape {} has {} variations", shape.id, shape.variations().len());
        catalog.insert(shape);
    }
    Ok(())
}

fn parse_usize(line: usize, text: &str) -> Result<usize, ParseError> {
    text.trim().parse().map_err(|source| ParseError::BadNumber {
        line,
        text: text.to_string(),
        source,
    })
}

fn parse_puzzle(
    line: usize,
    dims: &str,
    counts: &str,
    catalog_len: usize,
) -> Result<Puzzle, ParseError> {
    let Some((w, h)) = dims.split_once('x') else {
        return Err(ParseError::UnexpectedLine {
            line,
            text: dims.to_string(),
        });
    };
    let width = parse_usize(line, w)?;
    let height = parse_usize(line, h)?;
    if width == 0 || height == 0 {
        return Err(ParseError::ZeroDimension { line });
    }

    let counts = counts
        .split_whitespace()
        .map(|count| parse_usize(line, count))
        .collect::<Result<Vec<_>, _>>()?;
    if counts.len() != catalog_len {
        return Err(ParseError::CountMismatch {
            line,
            got: counts.len(),
            expected: catalog_len,
        });
    }

    Ok(Puzzle {
        width,
        height,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
0:
###
##.

1:
#..
###

2x5: 1 0
10x4: 2 3
";

    #[test]
    fn test_parses_shapes_and_puzzles() {
        let (catalog, puzzles) = parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().area(), 5);
        assert_eq!(catalog.get(1).unwrap().area(), 4);
        assert_eq!(
            puzzles,
            vec![
                Puzzle {
                    width: 2,
                    height: 5,
                    counts: vec![1, 0],
                },
                Puzzle {
                    width: 10,
                    height: 4,
                    counts: vec![2, 3],
                },
            ]
        );
    }

    #[test]
    fn test_shape_open_at_end_of_input_is_closed() {
        let (catalog, puzzles) = parse("0:\n##").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().area(), 2);
        assert!(puzzles.is_empty());
    }

    #[test]
    fn test_puzzle_line_closes_an_open_shape() {
        let (catalog, puzzles) = parse("0:\n##\n1x1: 0").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(puzzles.len(), 1);
    }

    #[test]
    fn test_board_alignment_skips_zero_counts() {
        let (catalog, puzzles) = parse(SAMPLE).unwrap();
        let board = puzzles[0].board(&catalog);
        assert_eq!(board.remaining_ids().collect::<Vec<_>>(), vec![0]);
        assert_eq!(board.remaining_count(0), 1);
    }

    #[test]
    fn test_duplicate_shape_id_is_rejected() {
        let err = parse("0:\n##\n\n0:\n#\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateShape { id: 0, .. }));
    }

    #[test]
    fn test_empty_shape_is_rejected() {
        let err = parse("0:\n...\n").unwrap_err();
        assert!(matches!(err, ParseError::EmptyShape { id: 0, .. }));
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let err = parse("0:\n##\n\n2x2: 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::CountMismatch {
                got: 2,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let err = parse("0x3:\n").unwrap_err();
        assert!(matches!(err, ParseError::ZeroDimension { line: 1 }));
    }

    #[test]
    fn test_pattern_line_outside_shape_is_rejected() {
        let err = parse("##\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedLine { line: 1, .. }));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let err = parse("0:\n##\n\n2x2: -1\n").unwrap_err();
        assert!(matches!(err, ParseError::BadNumber { .. }));
    }
}
