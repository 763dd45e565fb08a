use std::fmt::Debug;

/// Marker types for graph construction states
#[derive(Debug)]
pub struct NotBuilt;

#[derive(Debug)]
pub struct Built;
