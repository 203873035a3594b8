pub mod spline;
pub mod strategy;
