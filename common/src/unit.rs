//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing the latest entity update.
#[derive(Clone, Copy, Debug)]
pub struct Update;
