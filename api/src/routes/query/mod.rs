pub mod query_route;
pub mod query_types;
