// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod health;   // GET /api/auth/health - router liveness
pub mod login;    // POST /api/auth/login - authenticate and get JWT
pub mod register; // POST /api/auth/register - create new account
pub mod seed;     // GET|POST /api/auth/seed - shared test account
pub mod utils;

pub use health::health_get;
pub use login::login_post;
pub use register::register_post;
pub use seed::seed_test_user;
