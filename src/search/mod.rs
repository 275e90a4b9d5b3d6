pub mod client;
pub mod criteria;
pub mod filter;
