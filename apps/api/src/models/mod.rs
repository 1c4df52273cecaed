pub mod cv;
pub mod user;
