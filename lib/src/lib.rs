pub mod cipher_suite;
pub mod constants;
pub mod error;
pub mod rfc;
pub mod search;
pub mod technology;
pub mod vulnerability;
