// SPDX-License-Identifier: MIT OR Apache-2.0

//! UI components

pub mod board;

pub use board::{BoardResponse, BoardWidget};
