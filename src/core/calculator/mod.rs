pub mod layout;
pub mod rows;
pub mod timeline;
