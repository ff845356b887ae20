// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: CORS + tracing only

pub mod auth;    // /api/auth/* token acquisition
pub mod avatars; // /api/avatars/*
pub mod movies;  // /api/movies/*, /api/search
pub mod reviews; // read-only review feeds
pub mod system;  // /, /health
