pub mod consts;
pub mod error;
pub mod label;
pub mod sieve;
pub mod volume;
