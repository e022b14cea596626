pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use festx_auth::AuthService;
use festx_database::EventRepository;

pub struct AppState {
    pub auth_service: AuthService,
    pub events: EventRepository,
    pub cookie_secure: bool,
}
