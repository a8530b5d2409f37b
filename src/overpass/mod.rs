mod query_factory;

pub use query_factory::*;
