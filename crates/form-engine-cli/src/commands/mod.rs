pub mod check;
pub mod submit;
