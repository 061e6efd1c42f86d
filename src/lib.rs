pub mod analyzers;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod source;
pub mod stats;
