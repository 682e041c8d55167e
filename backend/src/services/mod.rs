pub mod documents;
pub mod generate;
