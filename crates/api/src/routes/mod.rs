//! Route Handlers

pub mod catalog;
pub mod features;
pub mod predict;
pub mod resolve;
