pub mod form;
pub mod output;
