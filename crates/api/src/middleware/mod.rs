pub mod client_meta;
