// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Security Level: Bearer token verified by the identity gate
// Middleware: identity_gate (route layer) + CORS + tracing
//
// Every handler here takes `AuthenticatedUser`; the subject id it carries is
// the only source of "who is calling".

pub mod auth;      // /api/auth/me
pub mod favorites; // /api/favorites/*
pub mod reviews;   // POST /api/reviews, /api/reviews/my-reviews
