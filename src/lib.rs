//! Match classification engine for the streamhub portal.
//!
//! Pure transforms from fetched [`sports_api::MatchRecord`] batches to what a
//! renderer needs: lifecycle status, winner flags, sport grouping, filtering
//! and display labels. Nothing here performs I/O except the favorites store.

pub mod classify;
pub mod derive;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod group;
