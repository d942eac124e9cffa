pub mod service_key;
