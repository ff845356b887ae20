pub mod me;

// Re-export handler functions for use in routing
pub use me::me_get;
pub use me::me_put;
