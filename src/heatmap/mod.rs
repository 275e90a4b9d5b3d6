pub mod grid;
pub mod rescale;
pub mod samples;
