//! # cspace-core
//!
//! Expression storage for cspace.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Type-safe expression handles
//! - Structural substitution and a precedence-aware printer
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: every structurally unique expression is stored once,
//!   so handle equality is structural equality
//! - **Structural Trees**: nodes carry no simplification; canonical forms are
//!   produced by the algebra engine and raised back into the arena

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod display;
pub mod expr;
pub mod handle;
pub mod intern;

pub use arena::ExprArena;
pub use display::ExprDisplay;
pub use expr::{functions, Constant, ExprNode, FunctionId, SymbolId};
pub use handle::ExprHandle;
