pub mod account;
pub mod food;
pub mod itinerary;
pub mod places;
pub mod travel;
