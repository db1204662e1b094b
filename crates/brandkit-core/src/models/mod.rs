pub mod business;
pub mod product;
pub mod session;
pub mod user;
