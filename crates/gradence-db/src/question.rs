pub mod mutation;
pub mod query;

pub use mutation::{Mutation, QuestionFields};
pub use query::Query;
