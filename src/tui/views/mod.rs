pub mod alert;
pub mod confirm;
pub mod home;
