pub mod error;
pub mod ray;

pub use error::ConfigError;
pub use ray::{Ray, RayHit};
