//! Authentication middleware
//! 
//! This module provides the bearer-token extractor and role checks used to
//! protect authenticated routes.

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};
use tracing::{debug, warn};

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::{TurfBookError, Result};

/// Authentication context for a request, decoded from its bearer token
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl AuthContext {
    /// Check whether this context satisfies the required role
    pub fn has_role(&self, required: UserRole) -> bool {
        role_includes(self.role, required)
    }

    /// Require a role or return a permission error
    pub fn require_role(&self, required: UserRole) -> Result<()> {
        if self.has_role(required) {
            debug!(user_id = self.user_id, role = %self.role, "Role check passed");
            Ok(())
        } else {
            warn!(user_id = self.user_id, role = %self.role, required = %required, "Role check failed");
            Err(TurfBookError::PermissionDenied(
                format!("Requires {} role", required)
            ))
        }
    }

    /// Check if the caller is an admin
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Role hierarchy, weakest first
fn role_hierarchy() -> [UserRole; 3] {
    [UserRole::User, UserRole::Partner, UserRole::Admin]
}

/// Check if role A includes the privileges of role B
pub fn role_includes(higher: UserRole, lower: UserRole) -> bool {
    let hierarchy = role_hierarchy();
    let higher_level = hierarchy.iter().position(|&r| r == higher).unwrap_or(0);
    let lower_level = hierarchy.iter().position(|&r| r == lower).unwrap_or(0);
    
    higher_level >= lower_level
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = TurfBookError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| TurfBookError::Authentication("Missing Authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| TurfBookError::Authentication("Authorization header must use the Bearer scheme".to_string()))?;

        let claims = state.services.auth_service.verify_token(token)?;

        Ok(AuthContext {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
