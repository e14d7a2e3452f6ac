pub mod brewer_store;
pub mod cancellation;
pub mod change_listeners;
pub mod store_state;
