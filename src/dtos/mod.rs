pub mod billboard;
pub mod category;
pub mod checkout;
pub mod color;
pub mod dashboard;
pub mod order;
pub mod product;
pub mod size;
pub mod store;
