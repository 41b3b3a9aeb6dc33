pub mod adopter;
pub mod adoption;
pub mod animal;
pub mod appointment;
pub mod stats;
pub mod user;
