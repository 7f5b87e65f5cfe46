pub mod password;
pub mod session;

/// Argon2 hash of the admin password, computed once at startup and shared
/// with the login handler as app data. The plaintext never leaves `main`.
pub struct AdminCredentials {
    pub password_hash: String,
}
