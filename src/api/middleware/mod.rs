// Middleware module

pub mod cors;

// Re-export for convenience
#[allow(unused_imports)]
pub use cors::create_cors_layer;
