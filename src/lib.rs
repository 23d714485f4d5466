pub mod config;
pub mod dates;
pub mod document;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod model;
pub mod pipeline;
pub mod store;
