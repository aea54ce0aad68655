//! Store primitives shared by every feature.
pub mod optimistic;
pub mod outcome;
pub mod resource;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
