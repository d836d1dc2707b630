//! Reorder requests.
//!
//! A reorder request is a list of 1-based working-list positions, usually
//! typed by the user as `3,1,2`.

use crate::error::{PdfDeckError, Result};
use std::str::FromStr;

/// How strictly reorder requests are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderPolicy {
    /// Every entry must be in range and the count must match the list
    /// length. Repeated or missing positions are accepted, so pages can be
    /// duplicated or dropped.
    #[default]
    Lenient,
    /// Additionally requires each position to appear exactly once.
    Strict,
}

impl FromStr for ReorderPolicy {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid reorder policy: {s}. Must be one of: lenient, strict"
            ))),
        }
    }
}

/// A parsed reorder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    input: String,
    positions: Vec<usize>,
}

impl OrderSpec {
    /// Parse a comma-separated list of 1-based positions.
    ///
    /// Only the syntax is checked here; ranges are checked against the
    /// working list by [`OrderSpec::validate`].
    ///
    /// ```
    /// use pdfdeck::pageset::OrderSpec;
    ///
    /// let order = OrderSpec::parse("3, 1,2").unwrap();
    /// assert_eq!(order.positions(), &[3, 1, 2]);
    /// assert!(OrderSpec::parse("1,two").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let mut positions = Vec::new();

        for part in input.split(',') {
            let part = part.trim();
            let position: i64 = part.parse().map_err(|_| {
                PdfDeckError::invalid_order(input, format!("'{part}' is not a page number"))
            })?;
            if position < 1 {
                return Err(PdfDeckError::invalid_order(
                    input,
                    format!("page {position} is out of range (pages start at 1)"),
                ));
            }
            positions.push(position as usize);
        }

        Ok(Self {
            input: input.trim().to_string(),
            positions,
        })
    }

    /// Build a request from positions that are already numeric.
    pub fn from_positions(positions: Vec<usize>) -> Self {
        let input = positions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self { input, positions }
    }

    /// The 1-based positions.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// The request as the user wrote it.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Check the request against a working list of `len` pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::InvalidOrder`] if the count differs from
    /// `len`, if any position is outside `1..=len`, or, under
    /// [`ReorderPolicy::Strict`], if a position repeats.
    pub fn validate(&self, len: usize, policy: ReorderPolicy) -> Result<()> {
        if self.positions.len() != len {
            return Err(PdfDeckError::invalid_order(
                &self.input,
                format!(
                    "expected {len} position(s), got {}",
                    self.positions.len()
                ),
            ));
        }

        if let Some(bad) = self.positions.iter().find(|&&p| p == 0 || p > len) {
            return Err(PdfDeckError::invalid_order(
                &self.input,
                format!("page {bad} is out of range (1-{len})"),
            ));
        }

        if policy == ReorderPolicy::Strict {
            let mut seen = vec![false; len];
            for &position in &self.positions {
                if std::mem::replace(&mut seen[position - 1], true) {
                    return Err(PdfDeckError::invalid_order(
                        &self.input,
                        format!("page {position} appears more than once"),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl FromStr for OrderSpec {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
