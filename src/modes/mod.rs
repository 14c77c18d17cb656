pub mod versus;

pub use versus::VersusMode;
