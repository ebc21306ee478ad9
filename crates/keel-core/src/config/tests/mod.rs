pub mod pipeline_tests;
pub mod schema_tests;
