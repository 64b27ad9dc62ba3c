pub mod gateway_config;
pub mod search_match;
