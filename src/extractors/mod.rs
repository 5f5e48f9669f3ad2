pub mod selector;

pub use selector::ResourceQuery;
