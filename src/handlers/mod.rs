// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token via the identity gate)

pub mod protected; // Tier 2: identity gate in front of every route
pub mod public;    // Tier 1: no authentication required
pub mod utils;
