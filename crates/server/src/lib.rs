pub mod api;
pub mod bundled;
pub mod metrics;
pub mod state;
