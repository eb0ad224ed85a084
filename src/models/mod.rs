pub mod billboard;
pub mod color;
pub mod order;
pub mod product;
pub mod size;
pub mod store;
