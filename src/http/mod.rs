pub mod client;

pub use client::TrackerClient;
