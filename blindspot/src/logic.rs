pub mod detect;
pub mod health;
pub mod highlight;
pub mod upload;
