pub mod geo;
pub mod ordering;
pub mod vec;

pub use geo::*;
pub use ordering::*;
pub use vec::*;
