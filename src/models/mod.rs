pub mod message;
pub mod review;
pub mod spot;
pub mod user;
