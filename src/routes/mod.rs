// Routing is segregated by access level, one module per tier. The tiers are
// merged (not nested) in `create_router` because the spec'd paths interleave:
// `GET /user` is admin-only while `GET /user/{userId}` is public.

pub mod admin;
pub mod authenticated;
pub mod public;
