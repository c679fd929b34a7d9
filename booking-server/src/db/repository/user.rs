//! User Repository

use super::RepoResult;
use sqlx::SqlitePool;

/// User row with credentials and resolved role name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl AuthUser {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Find user by username with role name resolved
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<AuthUser>> {
    let user = sqlx::query_as::<_, AuthUser>(
        "SELECT u.user_id, u.username, u.password_hash, r.name AS role
         FROM user u
         INNER JOIN role r ON u.role_id = r.role_id
         WHERE u.username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("s3cret-pass").expect("Failed to hash password");
        let user = AuthUser {
            user_id: 1,
            username: "alice".to_string(),
            password_hash: hash,
            role: "loyal".to_string(),
        };

        assert!(user.verify_password("s3cret-pass").expect("verify failed"));
        assert!(!user.verify_password("wrong-pass").expect("verify failed"));
    }
}
