//! Category expression parser.
//!
//! A category expression is a comma-separated list of category ids and
//! inclusive ranges, e.g. `"1,3,5-9"`. Whitespace around elements is
//! ignored.

use crate::model::Category;
use crate::{Error, Result};

/// Parsed set of category ids and ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatRanges {
    ranges: Vec<(i32, i32)>,
}

impl CatRanges {
    /// Parse an expression like `"1,3,5-9"`.
    ///
    /// Fails (recoverably) on empty elements, non-numeric elements, and
    /// ranges whose start exceeds their end.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut ranges = Vec::new();
        for element in expr.split(',') {
            let element = element.trim();
            if element.is_empty() {
                return Err(bad(expr, "empty element"));
            }
            ranges.push(parse_element(expr, element)?);
        }
        Ok(Self { ranges })
    }

    /// Whether the category falls in any parsed id or range.
    pub fn contains(&self, cat: Category) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= cat.0 && cat.0 <= hi)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Parsed `(low, high)` ranges in expression order; single ids appear
    /// as degenerate `(id, id)` ranges.
    pub fn ranges(&self) -> &[(i32, i32)] {
        &self.ranges
    }
}

fn parse_element(expr: &str, element: &str) -> Result<(i32, i32)> {
    // A dash past the first character splits a range; a leading dash is a
    // negative single id.
    let dash = element
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(idx, _)| idx);
    if let Some(idx) = dash {
        let (lo, hi) = element.split_at(idx);
        let lo = parse_id(expr, lo)?;
        let hi = parse_id(expr, &hi[1..])?;
        if lo > hi {
            return Err(bad(expr, format!("range {lo}-{hi} is reversed")));
        }
        Ok((lo, hi))
    } else {
        let id = parse_id(expr, element)?;
        Ok((id, id))
    }
}

fn parse_id(expr: &str, text: &str) -> Result<i32> {
    text.trim()
        .parse()
        .map_err(|_| bad(expr, format!("'{}' is not a category id", text.trim())))
}

fn bad(expr: &str, message: impl Into<String>) -> Error {
    Error::CategoryExpression { expr: expr.to_string(), message: message.into() }
}

// ============================================================================
// Tests
// ============================================================================
