pub mod kontent_client;
pub mod kontent_config;
