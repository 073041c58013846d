pub mod allocation;
pub mod chunk;
pub mod error;
pub mod reader;
pub mod style;
