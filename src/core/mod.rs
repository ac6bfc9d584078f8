pub mod confirmation;
pub mod outcome;
pub mod ports;
pub mod route;
pub mod token;
