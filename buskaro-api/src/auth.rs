use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buskaro_core::user::User;

use crate::error::ApiError;
use crate::middleware::auth::Claims;
use crate::state::{AppState, AuthConfig};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if req.name.is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }
    if req.password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if req.phone.is_empty() {
        return Err(ApiError::Validation("Phone is required".to_string()));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(ApiError::Internal("Email already exists".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user = User {
        id: Uuid::new_v4(),
        email: req.email,
        password_hash,
        name: req.name,
        phone: req.phone,
        created_at: Utc::now(),
    };
    state.users.insert(&user).await?;

    let token = issue_token(&user, &state.auth)?;
    tracing::info!(user_id = %user.id, "user signed up");

    Ok(Json(AuthResponse {
        token,
        email: user.email,
        name: user.name,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let parsed = PasswordHash::new(&user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Stored hash is malformed: {}", e)))?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed)
        .is_err()
    {
        return Err(ApiError::Unauthorized("Invalid email or password".to_string()));
    }

    let token = issue_token(&user, &state.auth)?;

    Ok(Json(AuthResponse {
        token,
        email: user.email,
        name: user.name,
    }))
}

fn issue_token(user: &User, auth: &AuthConfig) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "rider@example.com".to_string(),
            password_hash: String::new(),
            name: "Rider".to_string(),
            phone: "9999999999".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let auth = AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        };
        let user = user();

        let token = issue_token(&user, &auth).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(auth.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user.id.to_string());
        assert_eq!(data.claims.email, user.email);
    }

    #[test]
    fn token_fails_verification_with_wrong_secret() {
        let auth = AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        };
        let token = issue_token(&user(), &auth).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
