use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use kernel::prelude::entity::SessionId;
use uuid::Uuid;

pub static SESSION_COOKIE: &str = "bookshelf_session";

/// Reads the session cookie, issuing a fresh session when it is missing or unreadable.
pub fn resolve(jar: CookieJar) -> (CookieJar, SessionId) {
    let known = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
        .map(SessionId::new);
    match known {
        Some(session) => (jar, session),
        None => {
            let session = SessionId::generate();
            tracing::debug!(%session, "issuing session");
            let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), session)
        }
    }
}
