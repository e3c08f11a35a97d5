#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms,
    missing_debug_implementations
)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::explicit_iter_loop,
    clippy::future_not_send,
    clippy::todo,
    clippy::use_self
)]

pub mod broker;
pub mod client;
pub mod record;
pub mod testing;
pub mod topic;

pub use broker::{MockBroker, ReadBatch};
pub use client::consumer::StartOffset;
pub use client::error::{Error, Result};
pub use record::{Headers, Message, Record};
