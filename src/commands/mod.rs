pub mod import;
pub mod status;
