//! Pure data structures: the order record and the status sequence it moves through.

pub mod order;
pub mod status;

pub use order::*;
pub use status::*;
