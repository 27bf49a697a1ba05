// ============================================================================
// UI COMPONENTS — panels and the tool engine behind them
// ============================================================================

pub mod colors;
pub mod tools;
