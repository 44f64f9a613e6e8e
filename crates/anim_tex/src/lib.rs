//! # anim_tex
//!
//! Pure LaTeX builders for the matrix scenes.
//!
//! Every builder returns a [`TexExpr`]: the source string plus named
//! [`Tag`]s marking which fragments hold which cell, operator or bracket.
//! Highlighting selects by tag instead of by glyph offset, so a change in
//! spacing cannot silently recolour the wrong glyph.
//!
//! - [`matrix`]: [`Matrix`] and [`Cell`].
//! - [`expr`]: [`TexExpr`], [`TexBuilder`], [`Tag`], [`Role`], [`Scope`].
//! - [`builder`]: matrix, determinant and product strings.
//! - [`equation`]: linear-transform and question equations with colours.
//! - [`series`]: the Leibniz series, one coloured part per term.
//! - [`error`]: [`TexError`].

pub mod builder;
pub mod equation;
pub mod error;
pub mod expr;
pub mod matrix;
pub mod series;

pub use builder::{
    Bracket, matrix_determinant_text, matrix_multiply_text, matrix_to_text,
    matrix_to_text_isolated,
};
pub use equation::{ColoredTex, determinant_question, linear_transform_text, multiplication_question};
pub use error::TexError;
pub use expr::{Operand, Role, Scope, Span, Tag, TexBuilder, TexExpr};
pub use matrix::{Cell, Matrix};
pub use series::leibniz_series_parts;
