//! Authentication service implementation
//! 
//! This service handles user registration, password hashing and verification,
//! one-time code issuance and consumption, JWT issuance and validation, and
//! role-gated login for user, partner, and admin accounts.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{info, warn, debug};

use crate::config::settings::Settings;
use crate::database::repositories::{PartnerRepository, UserRepository, WalletRepository};
use crate::models::auth::{AuthResponse, Claims, LoginRequest, RegisterRequest};
use crate::models::partner::CreatePartnerDetailsRequest;
use crate::models::user::{CreateUserRequest, User, UserProfile, UserRole};
use crate::services::mailer::MailerService;
use crate::utils::errors::{TurfBookError, Result};
use crate::utils::helpers;

/// Authentication service for account registration, login, and tokens
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    partners: PartnerRepository,
    wallets: WalletRepository,
    mailer: MailerService,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        users: UserRepository,
        partners: PartnerRepository,
        wallets: WalletRepository,
        mailer: MailerService,
        settings: Settings,
    ) -> Self {
        Self {
            users,
            partners,
            wallets,
            mailer,
            settings,
        }
    }

    /// Register a new account and bootstrap its wallet.
    ///
    /// Admin accounts are provisioned out of band, never through this
    /// endpoint. Partner registrations may carry company details.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile> {
        let email = helpers::normalize_email(&request.email);
        debug!(email = %email, role = %request.role, "Registering new account");

        if request.role == UserRole::Admin {
            return Err(TurfBookError::PermissionDenied(
                "Admin accounts cannot be self-registered".to_string()
            ));
        }

        if request.role == UserRole::Partner && !self.settings.features.partner_registration {
            return Err(TurfBookError::PermissionDenied(
                "Partner registration is disabled".to_string()
            ));
        }

        if !helpers::is_valid_email(&email) {
            return Err(TurfBookError::InvalidInput(format!("Invalid email: {}", email)));
        }

        if request.password.len() < 8 {
            return Err(TurfBookError::InvalidInput(
                "Password must be at least 8 characters".to_string()
            ));
        }

        if let Some(ref phone) = request.phone {
            if !helpers::is_valid_phone(phone) {
                return Err(TurfBookError::InvalidInput(format!("Invalid phone number: {}", phone)));
            }
        }

        let password_hash = self.hash_password(&request.password)?;

        let user = self.users.create(CreateUserRequest {
            name: request.name,
            email: email.clone(),
            password_hash,
            role: request.role,
            phone: request.phone,
        }).await?;

        // Every account gets a wallet at registration.
        self.wallets.create_if_missing(user.id).await?;

        let partner_details = if user.role == UserRole::Partner {
            let company_name = request.company_name
                .ok_or_else(|| TurfBookError::InvalidInput("Partner registration requires a company name".to_string()))?;
            Some(self.partners.upsert(CreatePartnerDetailsRequest {
                user_id: user.id,
                company_name,
                contact_phone: user.phone.clone(),
            }).await?)
        } else {
            None
        };

        info!(user_id = user.id, email = %email, role = %user.role, "New account registered");
        self.log_auth_event(Some(user.id), &email, "register", true);

        Ok(UserProfile::from_user(user, partner_details))
    }

    /// Verify credentials and issue a token.
    ///
    /// Login is role-gated: a valid password for the wrong portal (e.g. a
    /// plain user on the partner dashboard) is rejected the same way as a
    /// bad password.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let email = helpers::normalize_email(&request.email);
        debug!(email = %email, role = %request.role, "Login attempt");

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.log_auth_event(None, &email, "login", false);
            return Err(TurfBookError::InvalidCredentials);
        };

        if !self.verify_password(&request.password, &user.password_hash)? {
            self.log_auth_event(Some(user.id), &email, "login", false);
            return Err(TurfBookError::InvalidCredentials);
        }

        if user.role != request.role {
            warn!(user_id = user.id, expected = %request.role, actual = %user.role, "Role-gated login rejected");
            self.log_auth_event(Some(user.id), &email, "login", false);
            return Err(TurfBookError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        self.log_auth_event(Some(user.id), &email, "login", true);

        let partner_details = if user.role == UserRole::Partner {
            self.partners.find_by_user_id(user.id).await?
        } else {
            None
        };

        Ok(AuthResponse {
            token,
            user: UserProfile::from_user(user, partner_details),
        })
    }

    /// Issue a fresh one-time code and email it to the account.
    ///
    /// A request for an unknown email succeeds without sending anything, so
    /// the endpoint cannot be used to probe which addresses are registered.
    pub async fn request_otp(&self, email: &str) -> Result<()> {
        if !self.settings.features.otp_login {
            return Err(TurfBookError::ServiceUnavailable("OTP login is disabled".to_string()));
        }

        let email = helpers::normalize_email(email);
        debug!(email = %email, "One-time code requested");

        let Some(user) = self.users.find_by_email(&email).await? else {
            info!(email = %email, "One-time code requested for unknown email");
            return Ok(());
        };

        let code = helpers::generate_otp_code(self.settings.otp.code_length);
        let expires_at = Utc::now() + Duration::minutes(self.settings.otp.ttl_minutes);

        self.users.set_otp(user.id, &code, expires_at).await?;
        self.mailer.send_otp_email(&email, &code, self.settings.otp.ttl_minutes).await?;

        self.log_auth_event(Some(user.id), &email, "otp_request", true);
        Ok(())
    }

    /// Consume a live one-time code and issue a token.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<AuthResponse> {
        if !self.settings.features.otp_login {
            return Err(TurfBookError::ServiceUnavailable("OTP login is disabled".to_string()));
        }

        let email = helpers::normalize_email(email);
        debug!(email = %email, "One-time code verification attempt");

        let Some(user) = self.users.consume_otp(&email, code).await? else {
            self.log_auth_event(None, &email, "otp_verify", false);
            return Err(TurfBookError::OtpInvalid);
        };

        let token = self.issue_token(&user)?;
        self.log_auth_event(Some(user.id), &email, "otp_verify", true);

        let partner_details = if user.role == UserRole::Partner {
            self.partners.find_by_user_id(user.id).await?
        } else {
            None
        };

        Ok(AuthResponse {
            token,
            user: UserProfile::from_user(user, partner_details),
        })
    }

    /// Issue a signed JWT for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.settings.jwt.expiry_hours)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.jwt.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Decode and validate a JWT, returning its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.jwt.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Hash a password with Argon2id
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TurfBookError::PasswordHash(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored Argon2 hash
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| TurfBookError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    /// Log authentication event
    fn log_auth_event(&self, user_id: Option<i64>, email: &str, action: &str, success: bool) {
        crate::utils::logging::log_auth_event(user_id, email, action, success);
    }
}
