pub(crate) mod api;
pub(crate) mod error;
pub(crate) mod exams;
pub(crate) mod swagger;
