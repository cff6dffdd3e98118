//! Operations spanning several tables. Creation of cipher suites and RFCs
//! derives every dependent field before anything is written, and writes
//! in a single transaction.
pub mod cipher_suites;
pub mod rfcs;
pub mod search;
