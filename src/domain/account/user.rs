//! User account entity and credential rules.

use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;
/// bcrypt ignores input past 72 bytes.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// A registered account.
///
/// `password_hash` is an opaque bcrypt string; plaintext never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new account after normalizing and validating its identity fields.
    pub fn register(
        username: &str,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: UserId::new(),
            username: normalize_username(username)?,
            email: normalize_email(email)?,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, username: &str) -> Result<(), ValidationError> {
        self.username = normalize_username(username)?;
        self.touch();
        Ok(())
    }

    pub fn change_email(&mut self, email: &str) -> Result<(), ValidationError> {
        self.email = normalize_email(email)?;
        self.touch();
        Ok(())
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    pub fn change_role(&mut self, role: Role) {
        self.role = role;
        self.touch();
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Case-insensitive substring match on username or email.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.username.to_lowercase().contains(&term)
            || self.email.contains(&term)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

/// Trims and validates a username: 3..=50 chars of `[A-Za-z0-9_.-]`.
pub fn normalize_username(raw: &str) -> Result<String, ValidationError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(ValidationError::empty_field("username"));
    }
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(ValidationError::out_of_range(
            "username",
            USERNAME_MIN as i64,
            USERNAME_MAX as i64,
            len as i64,
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(ValidationError::invalid_format(
            "username",
            "only letters, digits, '_', '.' and '-' are allowed",
        ));
    }
    Ok(username.to_string())
}

/// Trims, lowercases and validates an email address.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    let invalid = || ValidationError::invalid_format("email", "must look like name@domain.tld");
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
    {
        return Err(invalid());
    }
    Ok(email)
}

/// Checks a plaintext password before hashing.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(ValidationError::out_of_range(
            "password",
            PASSWORD_MIN as i64,
            PASSWORD_MAX_BYTES as i64,
            len as i64,
        ));
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return Err(ValidationError::invalid_format(
            "password",
            format!("must not exceed {} bytes", PASSWORD_MAX_BYTES),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::register("alice", "Alice@Example.com", "hash".to_string(), Role::User).unwrap()
    }

    #[test]
    fn register_normalizes_fields() {
        let user = User::register("  bob_99 ", " BOB@Example.COM ", "h".into(), Role::Admin).unwrap();
        assert_eq!(user.username, "bob_99");
        assert_eq!(user.email, "bob@example.com");
        assert!(user.is_admin());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn username_length_bounds() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username(&"a".repeat(51)).is_err());
        assert!(normalize_username("abc").is_ok());
        assert!(normalize_username(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn username_rejects_spaces_and_symbols() {
        assert!(matches!(
            normalize_username("john doe"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(normalize_username("john@doe").is_err());
        assert!(normalize_username("john.doe-1").is_ok());
    }

    #[test]
    fn email_validation() {
        assert!(normalize_email("a@b.co").is_ok());
        for bad in ["", "plain", "@x.com", "a@", "a@nodot", "a@@b.com", "a b@c.com", "a@.com", "a@b..com"] {
            assert!(normalize_email(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn password_rules() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn mutations_touch_updated_at() {
        let mut user = alice();
        let before = user.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        user.change_role(Role::Admin);
        assert!(user.updated_at.is_after(&before));
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn rename_validates() {
        let mut user = alice();
        assert!(user.rename("x").is_err());
        assert_eq!(user.username, "alice");
        user.rename("alice2").unwrap();
        assert_eq!(user.username, "alice2");
    }

    #[test]
    fn search_matches_username_or_email() {
        let user = alice();
        assert!(user.matches_search("ALI"));
        assert!(user.matches_search("example"));
        assert!(user.matches_search(""));
        assert!(!user.matches_search("bob"));
    }
}
