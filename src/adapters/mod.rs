// Adapters layer: concrete implementations of the domain ports.

pub mod rest_store;

pub use rest_store::RestStore;
