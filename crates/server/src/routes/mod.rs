pub mod docs;
pub mod groups;
pub mod health;
pub mod revenue;
pub mod sales;
pub mod users;
