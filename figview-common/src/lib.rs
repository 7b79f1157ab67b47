pub mod array;
pub mod transform;
