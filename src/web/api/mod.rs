pub mod error;
pub mod polar;
