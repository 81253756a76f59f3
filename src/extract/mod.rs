//! Literal Extraction
//!
//! Finds the numeric literals and uncertainty ranges embedded in an
//! expression and replaces each of them with a placeholder name:
//!
//! ```text
//! "1,10 * 2 + 3"  ->  "var0 * var1 + var2"
//!                     var0 = [1, 10], var1 = 2, var2 = 3
//! ```
//!
//! # Literal Grammar
//!
//! ```text
//! number  := "-"? digits ("." digits)? (("e" | "E") ("+" | "-")? digits)?
//! range   := number "," number
//! ```
//!
//! The range form is tried first at every position, so `1,10` is a single
//! range and never two scalars joined by a stray comma. Whitespace around
//! the comma is allowed.
//!
//! A `-` is only folded into a literal when it sits directly in front of the
//! digits and in operand position (start of input, after an operator, `(`
//! or `,`). After a number, a name or `)` it stays a subtraction, so
//! `10-2` is eight and `-5,5` is the range from minus five to five.
//!
//! Everything that is not a literal passes through unchanged and is left
//! for the evaluator to accept or reject.

pub mod lexer;
pub mod literal;

use std::ops::Range;

use log::{debug, trace};
use logos::Logos;

use crate::error::{FermiError, FermiResult};
use lexer::Token;
pub use literal::{LiteralSpec, Placeholder, PlaceholderTable};

/// Default prefix of generated placeholder names (`var0`, `var1`, ...)
pub const PLACEHOLDER_PREFIX: &str = "var";

/// Output of [`extract`]: the rewritten expression and its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub rewritten: String,
    pub table: PlaceholderTable,
}

type Spanned = (Option<Token>, Range<usize>);

struct ScannedNumber {
    value: f64,
    span: Range<usize>,
    next: usize,
}

struct ScannedLiteral {
    kind: LiteralSpec,
    span: Range<usize>,
    next: usize,
}

/// Replace every literal and range in `expression` by a placeholder.
///
/// # Errors
///
/// - [`FermiError::RangeOrder`] if a range has its bounds reversed.
/// - [`FermiError::MalformedRange`] if a comma is left over afterwards,
///   e.g. for `1,2,3`.
pub fn extract(expression: &str) -> FermiResult<Extraction> {
    let tokens: Vec<Spanned> = Token::lexer(expression)
        .spanned()
        .map(|(token, span)| (token.ok(), span))
        .collect();

    let prefix = placeholder_prefix(&tokens);
    let mut table = PlaceholderTable::new();
    let mut rewritten = String::with_capacity(expression.len());
    let mut cursor = 0;
    let mut operand_position = true;
    let mut i = 0;

    while i < tokens.len() {
        if let Some(literal) = scan_literal(expression, &tokens, i, operand_position)? {
            let name = format!("{}{}", prefix, table.len());
            let source = &expression[literal.span.clone()];
            trace!("{} <- '{}' ({})", name, source, literal.kind);

            rewritten.push_str(&expression[cursor..literal.span.start]);
            rewritten.push_str(&name);
            table.push(name, literal.kind, source.to_string());

            cursor = literal.span.end;
            i = literal.next;
            operand_position = false;
            continue;
        }

        // Unlexable input counts as an operator so a following '-' is a sign
        operand_position = tokens[i]
            .0
            .as_ref()
            .map_or(true, Token::starts_operand_position);
        i += 1;
    }
    rewritten.push_str(&expression[cursor..]);

    if rewritten.contains(',') {
        return Err(FermiError::MalformedRange);
    }

    debug!(
        "extracted {} literal(s), {} range(s): '{}'",
        table.len(),
        table.range_count(),
        rewritten
    );

    Ok(Extraction { rewritten, table })
}

/// Pick a prefix that no identifier in the input starts with.
fn placeholder_prefix(tokens: &[Spanned]) -> String {
    let mut prefix = PLACEHOLDER_PREFIX.to_string();
    while tokens.iter().any(|(token, _)| {
        matches!(token, Some(Token::Identifier(name)) if name.starts_with(prefix.as_str()))
    }) {
        prefix.insert(0, '_');
    }
    prefix
}

fn scan_number(tokens: &[Spanned], i: usize, operand_position: bool) -> Option<ScannedNumber> {
    match tokens.get(i)? {
        (Some(Token::Number(value)), span) => Some(ScannedNumber {
            value: *value,
            span: span.clone(),
            next: i + 1,
        }),
        (Some(Token::Minus), minus) if operand_position => match tokens.get(i + 1)? {
            (Some(Token::Number(value)), span) if span.start == minus.end => Some(ScannedNumber {
                value: -*value,
                span: minus.start..span.end,
                next: i + 2,
            }),
            _ => None,
        },
        _ => None,
    }
}

fn scan_literal(
    expression: &str,
    tokens: &[Spanned],
    i: usize,
    operand_position: bool,
) -> FermiResult<Option<ScannedLiteral>> {
    let Some(first) = scan_number(tokens, i, operand_position) else {
        return Ok(None);
    };

    if let Some((Some(Token::Comma), _)) = tokens.get(first.next) {
        if let Some(second) = scan_number(tokens, first.next + 1, true) {
            let span = first.span.start..second.span.end;
            let kind = LiteralSpec::range(first.value, second.value, &expression[span.clone()])?;
            return Ok(Some(ScannedLiteral {
                kind,
                span,
                next: second.next,
            }));
        }
    }

    Ok(Some(ScannedLiteral {
        kind: LiteralSpec::Scalar(first.value),
        span: first.span,
        next: first.next,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(extraction: &Extraction) -> Vec<LiteralSpec> {
        extraction.table.iter().map(|p| p.literal).collect()
    }

    #[test]
    fn bare_range_is_single_placeholder() {
        let extraction = extract("1,10").unwrap();
        assert_eq!(extraction.rewritten, "var0");
        assert_eq!(
            literals(&extraction),
            vec![LiteralSpec::Range {
                low: 1.0,
                high: 10.0
            }]
        );
        assert_eq!(extraction.table.iter().next().unwrap().source, "1,10");
    }

    #[test]
    fn range_takes_priority_and_keeps_surrounding_text() {
        let extraction = extract("10, 100 * 2").unwrap();
        assert_eq!(extraction.rewritten, "var0 * var1");
        assert_eq!(
            literals(&extraction),
            vec![
                LiteralSpec::Range {
                    low: 10.0,
                    high: 100.0
                },
                LiteralSpec::Scalar(2.0)
            ]
        );
    }

    #[test]
    fn caret_and_parentheses_pass_through() {
        let extraction = extract("(2^10) / 4").unwrap();
        assert_eq!(extraction.rewritten, "(var0^var1) / var2");
        assert_eq!(extraction.table.range_count(), 0);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = extract("5,1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "lower bound 5.0 is greater than upper bound 1.0 in range '5,1'"
        );
    }

    #[test]
    fn leftover_comma_is_malformed_range() {
        assert_eq!(extract("2 * 3,4,5"), Err(FermiError::MalformedRange));
        assert_eq!(extract("1,2,3"), Err(FermiError::MalformedRange));
        assert_eq!(extract("(1),2"), Err(FermiError::MalformedRange));
    }

    #[test]
    fn minus_after_operand_is_subtraction() {
        let extraction = extract("10-2").unwrap();
        assert_eq!(extraction.rewritten, "var0-var1");
        assert_eq!(
            literals(&extraction),
            vec![LiteralSpec::Scalar(10.0), LiteralSpec::Scalar(2.0)]
        );
    }

    #[test]
    fn minus_in_operand_position_is_a_sign() {
        let extraction = extract("-5,5 * -2").unwrap();
        assert_eq!(extraction.rewritten, "var0 * var1");
        assert_eq!(
            literals(&extraction),
            vec![
                LiteralSpec::Range {
                    low: -5.0,
                    high: 5.0
                },
                LiteralSpec::Scalar(-2.0)
            ]
        );
    }

    #[test]
    fn detached_minus_stays_an_operator() {
        let extraction = extract("- 3").unwrap();
        assert_eq!(extraction.rewritten, "- var0");
        assert_eq!(literals(&extraction), vec![LiteralSpec::Scalar(3.0)]);
    }

    #[test]
    fn negative_upper_bound_is_parsed() {
        let extraction = extract("-10,-1").unwrap();
        assert_eq!(
            literals(&extraction),
            vec![LiteralSpec::Range {
                low: -10.0,
                high: -1.0
            }]
        );
    }

    #[test]
    fn exponent_literals() {
        let extraction = extract("1e3,2.5E4").unwrap();
        assert_eq!(
            literals(&extraction),
            vec![LiteralSpec::Range {
                low: 1000.0,
                high: 25000.0
            }]
        );
    }

    #[test]
    fn repeated_literals_are_not_deduplicated() {
        let extraction = extract("2 * 2").unwrap();
        assert_eq!(extraction.rewritten, "var0 * var1");
        assert_eq!(extraction.table.len(), 2);
    }

    #[test]
    fn placeholder_prefix_avoids_user_identifiers() {
        let extraction = extract("var0 + 1").unwrap();
        assert_eq!(extraction.rewritten, "var0 + _var0");
        assert!(extraction.table.get("_var0").is_some());
        assert!(extraction.table.get("var0").is_none());
    }

    #[test]
    fn unknown_text_passes_through() {
        let extraction = extract("sqrt(4) $ 1").unwrap();
        assert_eq!(extraction.rewritten, "sqrt(var0) $ var1");
    }

    #[test]
    fn extraction_is_deterministic() {
        let input = "3,30 * (1 + 0.5,1.5) ^ 2";
        assert_eq!(extract(input).unwrap(), extract(input).unwrap());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ordered_ranges_extract_to_one_placeholder(a in 0u32..10_000, width in 0u32..10_000) {
                let b = a + width;
                let extraction = extract(&format!("{a},{b}")).unwrap();
                prop_assert_eq!(extraction.rewritten.as_str(), "var0");
                prop_assert_eq!(
                    extraction.table.get("var0"),
                    Some(&LiteralSpec::Range { low: a as f64, high: b as f64 })
                );
            }

            #[test]
            fn placeholder_count_matches_operands(values in proptest::collection::vec(1u32..1000, 1..20)) {
                let expression = values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" + ");
                let expected = (0..values.len())
                    .map(|i| format!("var{i}"))
                    .collect::<Vec<_>>()
                    .join(" + ");
                let extraction = extract(&expression).unwrap();
                prop_assert_eq!(extraction.table.len(), values.len());
                prop_assert_eq!(extraction.rewritten, expected);
            }
        }
    }
}
