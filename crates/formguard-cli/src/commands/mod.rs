pub mod check;
pub mod validators;
