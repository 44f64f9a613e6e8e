//! Tagged LaTeX expressions.
//!
//! A [`TexExpr`] is built fragment by fragment. Fragments are never merged or
//! re-split after building, so a tag's fragment range and byte range stay
//! valid for the life of the expression and follow directly from the row and
//! column counts of what was built.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Which sub-expression of a composite equation a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// Built directly, not embedded.
    Root,
    /// Left operand of a product.
    Left,
    /// Right operand of a product.
    Right,
    /// The vector a matrix is applied to.
    Vector,
    /// Right-hand side of an equation.
    Result,
}

/// Side of a product term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operand {
    Left,
    Right,
}

/// What a tagged range of fragments is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// The `Det` keyword.
    Prefix,
    /// `\begin{...}`.
    Open,
    /// `\end{...}`.
    Close,
    /// Everything between the brackets.
    Body,
    Cell { row: usize, col: usize },
    /// The `&` after column `col`.
    ColumnSeparator { row: usize, col: usize },
    /// The `\\` after row `row`.
    RowSeparator { row: usize },
    /// One product in a sum-of-products cell.
    Term { row: usize, col: usize, term: usize },
    Factor {
        row: usize,
        col: usize,
        term: usize,
        operand: Operand,
    },
    /// The `\cdot` inside a product term.
    Dot { row: usize, col: usize, term: usize },
    /// The `+` in front of term `term`.
    Plus { row: usize, col: usize, term: usize },
    /// The nth binary operator of an equation, or the sign of the nth
    /// series term.
    Operator(usize),
    Equals,
    /// The `\frac` of the nth series term; it typesets as the fraction bar.
    FractionBar(usize),
    Numerator(usize),
    Denominator(usize),
}

/// A role inside a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag {
    pub scope: Scope,
    pub role: Role,
}

impl Tag {
    #[must_use]
    pub const fn new(scope: Scope, role: Role) -> Self {
        Self { scope, role }
    }
}

impl From<Role> for Tag {
    fn from(role: Role) -> Self {
        Self::new(Scope::Root, role)
    }
}

/// Where a tag sits: fragment indices and the matching bytes of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub fragments: Range<usize>,
    pub bytes: Range<usize>,
}

/// LaTeX source split into fragments, with tagged fragment ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TexExpr {
    text: String,
    /// Byte offset where each fragment starts, plus the final length.
    bounds: Vec<usize>,
    tags: Vec<(Tag, Range<usize>)>,
}

impl TexExpr {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            bounds: vec![0],
            tags: Vec::new(),
        }
    }

    /// A single untagged fragment.
    #[must_use]
    pub fn raw(text: impl AsRef<str>) -> Self {
        let mut expr = Self::new();
        expr.push_fragment(text.as_ref());
        expr
    }

    /// Join expressions in order, keeping every tag.
    #[must_use]
    pub fn concat(parts: impl IntoIterator<Item = TexExpr>) -> Self {
        let mut expr = Self::new();
        for part in parts {
            expr.append(part);
        }
        expr
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.bounds.push(self.text.len());
    }

    /// Append `other`, shifting its tags past this expression's fragments.
    pub fn append(&mut self, other: TexExpr) {
        let shift = self.fragment_count();
        let base = self.text.len();
        self.text.push_str(&other.text);
        self.bounds
            .extend(other.bounds.iter().skip(1).map(|b| b + base));
        self.tags.extend(
            other
                .tags
                .into_iter()
                .map(|(tag, r)| (tag, r.start + shift..r.end + shift)),
        );
    }

    /// Move every root-scoped tag into `scope`.
    #[must_use]
    pub fn scoped(mut self, scope: Scope) -> Self {
        for (tag, _) in &mut self.tags {
            if tag.scope == Scope::Root {
                tag.scope = scope;
            }
        }
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.bounds.len() - 1
    }

    #[must_use]
    pub fn fragment(&self, index: usize) -> Option<&str> {
        let start = *self.bounds.get(index)?;
        let end = *self.bounds.get(index + 1)?;
        Some(&self.text[start..end])
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.bounds.windows(2).map(|w| &self.text[w[0]..w[1]])
    }

    fn span_of(&self, fragments: &Range<usize>) -> Span {
        Span {
            fragments: fragments.clone(),
            bytes: self.bounds[fragments.start]..self.bounds[fragments.end],
        }
    }

    /// All tags with their spans, innermost first within each nesting.
    pub fn tags(&self) -> impl Iterator<Item = (Tag, Span)> + '_ {
        self.tags.iter().map(|(tag, r)| (*tag, self.span_of(r)))
    }

    #[must_use]
    pub fn span(&self, tag: impl Into<Tag>) -> Option<Span> {
        let tag = tag.into();
        self.tags
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, r)| self.span_of(r))
    }

    /// The source text covered by `tag`.
    #[must_use]
    pub fn slice(&self, tag: impl Into<Tag>) -> Option<&str> {
        let span = self.span(tag)?;
        Some(&self.text[span.bytes])
    }
}

impl Default for TexExpr {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Incremental [`TexExpr`] construction with nested tags.
#[derive(Debug, Default)]
pub struct TexBuilder {
    expr: TexExpr,
}

impl TexBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expr: TexExpr::new(),
        }
    }

    /// Append one untagged fragment.
    pub fn push(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        self.expr.push_fragment(fragment.as_ref());
        self
    }

    /// Append one fragment tagged with `role`.
    pub fn push_tagged(&mut self, role: Role, fragment: impl AsRef<str>) -> &mut Self {
        self.tagged(role, |b| {
            b.push(fragment);
        })
    }

    /// Tag everything `f` appends with `role`.
    pub fn tagged(&mut self, role: Role, f: impl FnOnce(&mut Self)) -> &mut Self {
        let start = self.expr.fragment_count();
        f(self);
        let end = self.expr.fragment_count();
        self.expr.tags.push((Tag::from(role), start..end));
        self
    }

    /// Append a finished expression with its tags.
    pub fn append(&mut self, expr: TexExpr) -> &mut Self {
        self.expr.append(expr);
        self
    }

    #[must_use]
    pub fn finish(self) -> TexExpr {
        self.expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TexExpr {
        let mut b = TexBuilder::new();
        b.push("x")
            .push(" ")
            .push_tagged(Role::Equals, "=")
            .push(" ")
            .tagged(Role::Body, |b| {
                b.push_tagged(Role::Cell { row: 0, col: 0 }, "ab").push("c");
            });
        b.finish()
    }

    #[test]
    fn test_text_is_concatenation() {
        let expr = sample();
        assert_eq!(expr.text(), "x = abc");
        assert_eq!(expr.fragment_count(), 6);
        assert_eq!(expr.fragments().collect::<Vec<_>>(), ["x", " ", "=", " ", "ab", "c"]);
    }

    #[test]
    fn test_nested_spans() {
        let expr = sample();
        assert_eq!(expr.slice(Role::Body), Some("abc"));
        assert_eq!(expr.slice(Role::Cell { row: 0, col: 0 }), Some("ab"));
        let span = expr.span(Role::Equals).unwrap();
        assert_eq!(span.fragments, 2..3);
        assert_eq!(span.bytes, 2..3);
    }

    #[test]
    fn test_missing_tag() {
        assert_eq!(sample().span(Role::Prefix), None);
    }

    #[test]
    fn test_append_shifts_tags() {
        let mut expr = TexExpr::raw("lhs");
        expr.append(sample().scoped(Scope::Result));
        assert_eq!(expr.text(), "lhsx = abc");
        assert_eq!(expr.slice(Tag::new(Scope::Result, Role::Body)), Some("abc"));
        assert_eq!(expr.span(Role::Body), None);
        assert_eq!(
            expr.span(Tag::new(Scope::Result, Role::Equals)).unwrap().fragments,
            3..4
        );
    }

    #[test]
    fn test_scoped_keeps_existing_scopes() {
        let inner = sample().scoped(Scope::Left);
        let outer = TexExpr::concat([inner]).scoped(Scope::Result);
        assert!(outer.span(Tag::new(Scope::Left, Role::Equals)).is_some());
        assert!(outer.span(Tag::new(Scope::Result, Role::Equals)).is_none());
    }

    #[test]
    fn test_fragment_lookup() {
        let expr = sample();
        assert_eq!(expr.fragment(4), Some("ab"));
        assert_eq!(expr.fragment(6), None);
    }
}
