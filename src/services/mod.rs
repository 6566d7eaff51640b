pub mod analysis;
pub mod collaborative;
pub mod explanation;
pub mod recommendations;
pub mod scoring;
pub mod trends;
