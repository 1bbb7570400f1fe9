pub mod error;
pub mod formato;
pub mod html;
pub mod id;
pub mod relogio;
