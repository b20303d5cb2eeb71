pub mod config;
pub mod fetch;
pub mod model;
pub mod render;
pub mod schema;
pub mod site;
pub mod table;
