pub mod check;
pub mod classify;
pub mod matrix;
pub mod rules;
