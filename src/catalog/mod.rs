pub mod model;
pub mod pager;
pub mod user;
