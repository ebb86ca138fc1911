//! Domain Models - The vocabulary of the study app
//!
//! These types represent the "Ubiquitous Language" of practice sessions.
//! Every name here should match how we talk about the system.

pub mod attempt;
pub mod card;
pub mod category;
pub mod deck;
pub mod statistics;
