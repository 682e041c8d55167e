pub mod messages;
pub mod model;
pub mod naming;
pub mod requests;
pub mod transform;
