pub mod resolver;

pub use resolver::QueryResolver;
