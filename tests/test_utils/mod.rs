//! Helpers shared by the integration test binaries. Not every binary uses
//! every helper.
#![allow(dead_code)]

pub mod fixtures;
pub mod stub_store;

#[allow(unused_imports)]
pub use fixtures::{RecordingDiagnostics, store, tcp_builder, udp_builder};
#[allow(unused_imports)]
pub use stub_store::{StoreCall, StubStore};
