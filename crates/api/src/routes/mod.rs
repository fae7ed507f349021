//! Route handlers

pub mod detect;
pub mod pages;
