pub mod extent;
pub mod projection;
