//! 1-based table lookups

use crate::core::error::{ReliabilityError, Result};

/// Where a lookup happens, for error reporting
#[derive(Debug, Clone, Copy)]
pub struct LookupContext {
    pub family: &'static str,
    pub operation: &'static str,
    pub table: &'static str,
}

impl LookupContext {
    pub const fn new(family: &'static str, operation: &'static str, table: &'static str) -> Self {
        Self {
            family,
            operation,
            table,
        }
    }

    fn out_of_range(&self, id: u32, len: usize) -> ReliabilityError {
        ReliabilityError::Range {
            family: self.family,
            operation: self.operation,
            table: self.table,
            id,
            len,
        }
    }
}

/// Fetch `values[id - 1]`
///
/// Valid identifiers are exactly `1..=values.len()`.
pub fn get_by_id<T: Copy>(values: &[T], id: u32, ctx: LookupContext) -> Result<T> {
    let offset = (id as usize)
        .checked_sub(1)
        .ok_or_else(|| ctx.out_of_range(id, values.len()))?;
    let value = values
        .get(offset)
        .copied()
        .ok_or_else(|| ctx.out_of_range(id, values.len()))?;
    tracing::trace!(
        family = ctx.family,
        table = ctx.table,
        id,
        "table lookup"
    );
    Ok(value)
}

/// Fetch the sub-table for `id` from a table of tables
pub fn get_table_by_id<'a, T>(tables: &'a [&'a [T]], id: u32, ctx: LookupContext) -> Result<&'a [T]> {
    let offset = (id as usize)
        .checked_sub(1)
        .ok_or_else(|| ctx.out_of_range(id, tables.len()))?;
    tables
        .get(offset)
        .copied()
        .ok_or_else(|| ctx.out_of_range(id, tables.len()))
}

/// Count of breakpoints strictly below `value`
///
/// Used for the banded factors (resistance, voltage ratio) where a value in
/// the n-th band selects the n-th entry of the factor table.
pub fn band_index(breakpoints: &[f64], value: f64) -> usize {
    breakpoints.iter().filter(|b| value > **b).count()
}
