pub mod export;
pub mod selection;
pub mod status;
