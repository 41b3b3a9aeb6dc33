pub mod animal_search;
pub mod api;
pub mod guard;
pub mod notify;
pub mod schedule;
pub mod validate;
