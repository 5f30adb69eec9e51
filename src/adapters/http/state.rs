//! Shared state for every route: the ports plus a few HTTP settings.

use std::sync::Arc;

use crate::application::handlers::accounts::{
    CreateUserHandler, DeleteUserHandler, UpdateUserHandler, UserQueryHandler,
};
use crate::application::handlers::auth::{
    LoginHandler, LogoutHandler, RefreshSessionHandler, RegisterHandler,
    RequestPasswordResetHandler,
};
use crate::application::handlers::catalog::{
    CreateToolHandler, ToolQueryHandler, UpdateToolHandler,
};
use crate::application::handlers::usage::{RecordUsageHandler, UsageQueryHandler};
use crate::application::handlers::utilities::{DnsLookupHandler, UrlTesterHandler};
use crate::ports::{
    AccessTokenIssuer, DnsResolver, HttpProbe, PasswordHasher, RefreshTokenRepository,
    SessionValidator, ToolRepository, UsageLogRepository, UserRepository,
};

/// Settings the HTTP layer needs beyond the ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Adds `Secure` to session cookies.
    pub secure_cookies: bool,
    pub refresh_token_ttl_secs: u64,
    pub allow_private_targets: bool,
    /// Work factor for the hash tool's bcrypt output.
    pub bcrypt_cost: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            secure_cookies: false,
            refresh_token_ttl_secs: 604_800,
            allow_private_targets: false,
            bcrypt_cost: 10,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub tools: Arc<dyn ToolRepository>,
    pub usage_logs: Arc<dyn UsageLogRepository>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_issuer: Arc<dyn AccessTokenIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub dns_resolver: Arc<dyn DnsResolver>,
    pub http_probe: Arc<dyn HttpProbe>,
    pub settings: HttpSettings,
}

impl AppState {
    // ════════════════════════════════════════════════════════════════════════════
    // Auth
    // ════════════════════════════════════════════════════════════════════════════

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.refresh_tokens.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
            self.settings.refresh_token_ttl_secs,
        )
    }

    pub fn refresh_session_handler(&self) -> RefreshSessionHandler {
        RefreshSessionHandler::new(
            self.users.clone(),
            self.refresh_tokens.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn logout_handler(&self) -> LogoutHandler {
        LogoutHandler::new(self.refresh_tokens.clone())
    }

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.create_user_handler())
    }

    pub fn password_reset_handler(&self) -> RequestPasswordResetHandler {
        RequestPasswordResetHandler::new(self.users.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accounts
    // ════════════════════════════════════════════════════════════════════════════

    pub fn create_user_handler(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone(), self.refresh_tokens.clone())
    }

    pub fn user_queries(&self) -> UserQueryHandler {
        UserQueryHandler::new(self.users.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Catalog and usage
    // ════════════════════════════════════════════════════════════════════════════

    pub fn create_tool_handler(&self) -> CreateToolHandler {
        CreateToolHandler::new(self.tools.clone())
    }

    pub fn update_tool_handler(&self) -> UpdateToolHandler {
        UpdateToolHandler::new(self.tools.clone())
    }

    pub fn tool_queries(&self) -> ToolQueryHandler {
        ToolQueryHandler::new(self.tools.clone())
    }

    pub fn record_usage_handler(&self) -> RecordUsageHandler {
        RecordUsageHandler::new(self.usage_logs.clone())
    }

    pub fn usage_queries(&self) -> UsageQueryHandler {
        UsageQueryHandler::new(self.usage_logs.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Network utilities
    // ════════════════════════════════════════════════════════════════════════════

    pub fn dns_lookup_handler(&self) -> DnsLookupHandler {
        DnsLookupHandler::new(self.dns_resolver.clone())
    }

    pub fn url_tester_handler(&self) -> UrlTesterHandler {
        UrlTesterHandler::new(self.http_probe.clone(), self.settings.allow_private_targets)
    }
}
