pub mod diagnostic;
pub mod errors;
pub mod exprs;
pub mod file;
pub mod keywords;
pub mod parser;
