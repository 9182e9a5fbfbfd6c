pub mod advertising;
pub mod health;
pub mod iris;
pub mod review;
