pub mod booking_store;
pub mod mongo;
