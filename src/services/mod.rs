pub mod server;
pub mod tracker;

pub use tracker::TrackerService;
