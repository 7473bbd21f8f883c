pub mod health;
pub mod tracking;
