pub mod build;
pub mod induce;
pub mod polygonalize;
