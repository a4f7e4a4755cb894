pub mod convert;
pub mod expiration;
pub mod premium;
pub mod serve;
pub mod status;
