mod beacon;
mod deauthentication;

pub use beacon::Beacon;
pub use deauthentication::{Deauthentication, DeauthenticationReason};
