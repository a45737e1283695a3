//! Process-wide auth settings, built once at startup and shared by `Arc`.

use secrecy::SecretString;

/// Auth library extensions whose data the session lookup understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPlugin {
    /// Adds `role` and bans to users.
    Admin,
    /// Accepts the session token from `Authorization: Bearer`.
    Bearer,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    app_name: String,
    secret: SecretString,
    cookie_prefix: String,
    plugins: Vec<AuthPlugin>,
    secure_cookies: bool,
}

impl AuthConfig {
    pub const DEFAULT_COOKIE_PREFIX: &'static str = "better-auth";
    pub const SECURE_COOKIE_PREFIX: &'static str = "__Secure-";

    /// `secret` is the key the auth library signs session cookies with.
    #[must_use]
    pub fn new(app_name: impl Into<String>, secret: SecretString) -> Self {
        Self {
            app_name: app_name.into(),
            secret,
            cookie_prefix: Self::DEFAULT_COOKIE_PREFIX.to_string(),
            plugins: vec![AuthPlugin::Admin],
            secure_cookies: false,
        }
    }

    #[must_use]
    pub fn with_cookie_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cookie_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Vec<AuthPlugin>) -> Self {
        self.plugins = plugins;
        self
    }

    #[must_use]
    pub const fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub const fn secret(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub fn plugins(&self) -> &[AuthPlugin] {
        &self.plugins
    }

    #[must_use]
    pub fn admin_enabled(&self) -> bool {
        self.plugins.contains(&AuthPlugin::Admin)
    }

    #[must_use]
    pub fn bearer_enabled(&self) -> bool {
        self.plugins.contains(&AuthPlugin::Bearer)
    }

    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }

    /// Cookie carrying the signed session token, e.g. `better-auth.session_token`.
    ///
    /// Secure cookies carry the `__Secure-` prefix.
    #[must_use]
    pub fn session_cookie_name(&self) -> String {
        if self.secure_cookies {
            format!(
                "{}{}.session_token",
                Self::SECURE_COOKIE_PREFIX,
                self.cookie_prefix
            )
        } else {
            format!("{}.session_token", self.cookie_prefix)
        }
    }
}
