//! Built-in mesh primitives
//!
//! Scripts can attach and detach these but never inspect them.

/// Unit quad in the XY plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadComponent;

/// Unit cube centered on the origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeComponent;
