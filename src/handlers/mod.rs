pub mod edit;
pub mod oneshot;
