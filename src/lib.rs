//! Slidewatch - lifecycle driver for slide-deck slides.
//!
//! A slide is one element in a host document. Slidewatch watches it become
//! visible (the deck engine adds a marker class), runs first-appearance
//! effects, then watches it get removed from its parent:
//!
//! ```text
//! dom::Document --flush--> observe::MutationBus --batches--> lifecycle::Slide
//!                                                                 |
//!                                                           appear::activate
//!                                                          (links, media, charts)
//! ```
//!
//! Everything runs on one thread inside a `tokio::task::LocalSet`.

pub mod logger;

pub mod appear;
pub mod chart;
pub mod config;
pub mod dom;
pub mod lifecycle;
pub mod observe;

#[cfg(test)]
mod testing;
