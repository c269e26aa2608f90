// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Resolve the caller's identity at the HTTP edge.
// - Instantiate the in-memory adapters and wire them into use case handlers.
// - Expose the HTTP router and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod identity;
pub mod state;
