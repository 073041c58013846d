pub mod font;
pub mod object;
pub mod surface;
pub mod vehicle;
