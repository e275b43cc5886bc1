pub mod cli;
pub mod dataset;
pub mod pivot;
pub mod plot;
