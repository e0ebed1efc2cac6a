//! # recencylist
//!
//! Ordered node sequence used as the recency queue of `recencycache`.
//!
//! ## Architecture
//! - **Arena**: nodes live in a slot table, vacant slots are recycled
//! - **Links**: `prev`/`next` are slot indices, never owning pointers
//! - **Handles**: stable while the node stays linked, across any number of moves
//!
//! Every structural edit (`push_front`, `push_back`, `remove`,
//! `move_to_front`) is O(1) given a [`Handle`].

#![warn(missing_docs)]

mod error;
mod list;

pub use error::{Error, Result};
pub use list::{Handle, Iter, List};
