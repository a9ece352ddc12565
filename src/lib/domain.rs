//! Domain logic, free of any transport or presentation concerns.

pub mod communication;
pub mod contact;
