pub mod a001_client;
pub mod a002_license;
