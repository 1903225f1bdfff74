//! Task Prioritization
//!
//! Eisenhower-style classification of tasks into urgency x importance
//! quadrants, and grouping of task lists into the matrix.

#![warn(missing_docs)]

pub mod classifier;
pub mod matrix;
pub mod quadrant;

pub use classifier::{
    classify, is_important, local_due_date, quadrant_for, ClassifierConfig, PriorityClassifier, Urgency,
};
pub use matrix::{EisenhowerMatrix, MatrixEntry};
pub use quadrant::{InvalidQuadrant, Quadrant};
