pub mod category;
pub mod geometry;
pub mod lap;
pub mod project;
pub mod row;
