mod runner;

pub use runner::{run_once, RunSummary};
