pub mod distance_format;
pub mod proximity;
