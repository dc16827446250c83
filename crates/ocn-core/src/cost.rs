use crate::error::OcnError;

/// Cost of a path: hop count or latency in whole cycles.
///
/// Unsigned, so negative edge costs cannot be expressed.
pub type Cost = u64;

/// Cost of a single link when none is given.
pub const DEFAULT_LINK_COST: Cost = 1;

/// Sum two path costs.
///
/// Saturates at `Cost::MAX` instead of wrapping, so an absurdly long route can
/// never look cheaper than its parts.
pub fn add_costs(a: Cost, b: Cost) -> Cost {
    a.saturating_add(b)
}

/// Convert a parsed integer into a cost, rejecting negative values.
pub fn cost_from_signed(value: i64, what: &'static str) -> Result<Cost, OcnError> {
    Cost::try_from(value).map_err(|_| OcnError::NegativeCost { what, value })
}
