//! Wire messages and stubs for the `auth.Auth` service, generated from
//! `proto/auth/auth.proto`.
//!
//! Field numbers are the contract with existing clients; never reuse one.

#[allow(clippy::all)]
mod generated {
    tonic::include_proto!("auth");
}

pub use generated::*;
