/// Runtime values.
///
/// Defines the `Value` enum every expression evaluates to, together with its
/// equality, truthiness and display rules.
pub mod core;
/// Host capabilities.
///
/// Values injected by the embedding application: native callables and opaque
/// objects that expose members through a registered-member table instead of
/// reflection.
pub mod host;
