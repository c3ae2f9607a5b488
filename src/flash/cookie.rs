//! Signed-cookie backed notification store.
//!
//! The queue is form-urlencoded (`category=message&...`) into a single
//! HMAC-signed cookie. A cookie that fails verification or decoding is
//! treated as an empty queue.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use rand::RngCore;
use sha2::{Digest, Sha512};
use url::form_urlencoded;

use crate::flash::{Category, Notification, NotificationStore};

/// Secrets shorter than this are accepted but logged.
const MIN_SECRET_LEN: usize = 32;

/// Name of the cookie carrying the queue.
#[derive(Debug, Clone)]
pub struct CookieName(pub Arc<str>);

/// Derive the cookie signing key from the configured secret.
///
/// Without a secret a random key is generated, which means queued
/// notifications do not survive a restart.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                tracing::warn!(
                    length = secret.len(),
                    minimum = MIN_SECRET_LEN,
                    "SECRET_KEY is short; use a longer random value"
                );
            }
            let digest = Sha512::digest(secret.as_bytes());
            Key::from(digest.as_slice())
        }
        None => {
            tracing::warn!(
                "SECRET_KEY is not set; generated a random signing key for this process. \
                 Set SECRET_KEY so sessions survive restarts"
            );
            let mut bytes = [0u8; 64];
            rand::thread_rng().fill_bytes(&mut bytes);
            Key::from(&bytes[..])
        }
    }
}

/// Notification store carried by the client in a signed cookie.
///
/// Extract it in a handler and return it as part of the response so changes
/// are written back.
pub struct FlashCookie {
    jar: SignedCookieJar,
    name: Arc<str>,
    pending: Vec<Notification>,
    dirty: bool,
}

impl FlashCookie {
    fn from_jar(jar: SignedCookieJar, name: Arc<str>) -> Self {
        let pending = jar
            .get(&name)
            .map(|cookie| decode(cookie.value()))
            .unwrap_or_default();

        Self {
            jar,
            name,
            pending,
            dirty: false,
        }
    }

    /// Pending notifications, without draining them.
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}

impl NotificationStore for FlashCookie {
    fn push(&mut self, category: Category, message: impl Into<String>) {
        self.pending.push(Notification::new(category, message));
        self.dirty = true;
    }

    fn drain(&mut self) -> Vec<Notification> {
        if !self.pending.is_empty() {
            self.dirty = true;
        }
        std::mem::take(&mut self.pending)
    }
}

impl<S> FromRequestParts<S> for FlashCookie
where
    S: Send + Sync,
    Key: FromRef<S>,
    CookieName: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
        let CookieName(name) = CookieName::from_ref(state);
        Ok(Self::from_jar(jar, name))
    }
}

impl IntoResponseParts for FlashCookie {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }

        let name = self.name.to_string();
        let jar = if self.pending.is_empty() {
            self.jar.remove(Cookie::build((name, "")).path("/"))
        } else {
            let cookie = Cookie::build((name, encode(&self.pending)))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            self.jar.add(cookie)
        };

        jar.into_response_parts(res)
    }
}

fn encode(notifications: &[Notification]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for n in notifications {
        serializer.append_pair(n.category.as_str(), &n.message);
    }
    serializer.finish()
}

fn decode(value: &str) -> Vec<Notification> {
    let mut notifications = Vec::new();
    for (category, message) in form_urlencoded::parse(value.as_bytes()) {
        match Category::parse(&category) {
            Some(category) => notifications.push(Notification::new(category, message)),
            None => tracing::warn!(category = %category, "Dropping notification with unknown category"),
        }
    }
    notifications
}
