//! Server-side registration shims
//!
//! Component registration only means something in the browser. These keep
//! the same call surface on the server without doing anything.

/// Define a component. Does nothing on the server.
pub fn define_component<T>(_definition: T) {}

/// Register a component type. Returns the type name unchanged.
pub fn register_component<S>(type_name: S) -> S {
    type_name
}
