pub mod bits;
pub mod bytes;
pub mod traits;
