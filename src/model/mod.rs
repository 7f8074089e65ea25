//! Document model types for running content placement.
//!
//! This module defines the data that flows into and out of the placement
//! engine: the finalized page layout, the descriptors derived from it,
//! document metadata used for placeholder substitution, and the
//! placement records handed to the drawing collaborator.

mod metadata;
mod page;
mod placement;

pub use metadata::Metadata;
pub use page::{Layout, LayoutPage, PageDescriptor, Role, SectionSpan};
pub use placement::{Band, PlacementResult, Side};
