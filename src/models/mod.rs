pub mod order;
pub mod product;
pub mod report;
pub mod seller;
pub mod user;
