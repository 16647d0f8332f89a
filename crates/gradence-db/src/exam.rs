pub mod error;
pub mod mutation;
pub mod query;

pub use error::ExamStoreError;
pub use mutation::Mutation;
pub use query::Query;
