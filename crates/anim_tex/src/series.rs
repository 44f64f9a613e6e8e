//! Alternating series written one term per expression.

use anim_object::Color;

use crate::equation::ColoredTex;
use crate::expr::{Role, TexBuilder};

fn sign(term: usize) -> &'static str {
    if term % 2 == 1 { "-" } else { "+" }
}

fn fraction(builder: &mut TexBuilder, term: usize, numerator: &str, denominator: &str) {
    builder
        .push_tagged(Role::FractionBar(term), r"\frac")
        .push("{")
        .push_tagged(Role::Numerator(term), numerator)
        .push("}{")
        .push_tagged(Role::Denominator(term), denominator)
        .push("}");
}

/// `\frac{\pi}{4} = 1 - \frac{1}{3} + \frac{1}{5} - ... \dots`, one part per
/// term so each term can be emphasised on its own.
///
/// Part 0 is `\frac{\pi}{4} = 1`. Part `k` for `1..=terms` is the signed
/// fraction `\frac{1}{2k+1}`. The last part is the signed `\dots`. The left
/// side is yellow, signs red, numerals green and fraction bars blue.
#[must_use]
pub fn leibniz_series_parts(terms: usize) -> Vec<ColoredTex> {
    let mut parts = Vec::with_capacity(terms + 2);

    let mut head = TexBuilder::new();
    head.push_tagged(Role::Prefix, r"\frac{\pi}{4}")
        .push(" ")
        .push_tagged(Role::Equals, "=")
        .push(" ")
        .push_tagged(Role::Numerator(0), "1");
    parts.push(head.finish());

    for term in 1..=terms {
        let mut part = TexBuilder::new();
        part.push_tagged(Role::Operator(term), sign(term)).push(" ");
        fraction(&mut part, term, "1", &(2 * term + 1).to_string());
        parts.push(part.finish());
    }

    let mut tail = TexBuilder::new();
    tail.push_tagged(Role::Operator(terms + 1), sign(terms + 1))
        .push(" ")
        .push(r"\dots");
    parts.push(tail.finish());

    parts
        .into_iter()
        .map(|expr| {
            let mut tex = ColoredTex::new(expr);
            tex.paint(Role::Prefix, Color::YELLOW);
            tex.paint_where(|t| matches!(t.role, Role::Operator(_)), Color::RED);
            tex.paint_where(
                |t| matches!(t.role, Role::Numerator(_) | Role::Denominator(_)),
                Color::GREEN,
            );
            tex.paint_where(|t| matches!(t.role, Role::FractionBar(_)), Color::BLUE);
            tex
        })
        .collect()
}
