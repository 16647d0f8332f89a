pub mod exam;
pub mod question;
pub mod util;

pub use sea_orm;
