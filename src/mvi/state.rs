//! Base trait for reducer-owned state.

/// Marker trait for state owned by a reducer.
///
/// States are cloneable, comparable (to detect no-op writes) and have an
/// empty default used after a wholesale clear.
pub trait ModelState: Clone + PartialEq + Default + Send + 'static {}
