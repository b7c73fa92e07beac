//! Shape Packing Solver Library
//!
//! Decides whether a multiset of grid shapes, each with a required placement
//! count, can be placed on a rectangular grid without overlap. Shapes may be
//! rotated and reflected; cells not covered by any shape are allowed.

pub mod board;
pub mod parser;
pub mod shape;
pub mod solver;
