pub mod composite;
pub mod posting;
pub mod store;
