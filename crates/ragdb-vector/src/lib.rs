#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod index;
pub mod normalize;

pub use index::VectorIndex;
pub use normalize::normalize;
