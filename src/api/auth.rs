use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use sha2::{Digest, Sha256};

use crate::api::models::{ErrorBody, LoginRequest, MeResponse};
use crate::api::sessions::{new_token, SessionStore};
use crate::utilities::database::seatapp::{get_user_by_id, get_user_by_upn, AppUser};
use crate::utilities::database::Database;

pub const SESSION_COOKIE: &str = "session";

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{:x}", digest)
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(stored_hash)
}

/// Resolves the logged-in user from the session cookie, if any.
pub async fn authenticate(
    req: &HttpRequest,
    store: &dyn SessionStore,
    db: &Database,
) -> anyhow::Result<Option<AppUser>> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(user_id) = store.get(cookie.value()) else {
        return Ok(None);
    };
    get_user_by_id(db, user_id).await
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub async fn login(
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let user = match get_user_by_upn(&db, &body.username).await {
        Ok(user) => user,
        Err(e) => return internal_error(e),
    };
    let Some(user) = user else {
        return unauthorized();
    };
    if !verify_password(&body.password, &user.password_hash) {
        return unauthorized();
    }

    let token = new_token();
    store.put(token.clone(), user.id);
    HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(me_body(&user))
}

pub async fn logout(req: HttpRequest, store: web::Data<dyn SessionStore>) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        store.delete(cookie.value());
    }
    let mut expired = session_cookie(String::new());
    expired.make_removal();
    HttpResponse::Ok()
        .cookie(expired)
        .json(serde_json::json!({ "ok": true }))
}

pub async fn me(
    req: HttpRequest,
    db: web::Data<Database>,
    store: web::Data<dyn SessionStore>,
) -> HttpResponse {
    match authenticate(&req, store.get_ref(), &db).await {
        Ok(Some(user)) => HttpResponse::Ok().json(me_body(&user)),
        Ok(None) => unauthorized(),
        Err(e) => internal_error(e),
    }
}

fn me_body(user: &AppUser) -> MeResponse {
    MeResponse {
        id: user.id,
        upn: user.upn.clone(),
        name: user.name.clone(),
        dept: user.dept.clone(),
        roles: user.roles.clone(),
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorBody::new("Invalid credentials"))
}

pub(crate) fn internal_error(e: anyhow::Error) -> HttpResponse {
    eprintln!("internal error: {:#}", e);
    HttpResponse::InternalServerError().json(ErrorBody::new("Internal error"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_digest_matches_known_vector() {
        // sha256("password")
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn verification_is_case_insensitive_on_the_stored_hex() {
        let upper = hash_password("lozinka").to_uppercase();
        assert!(verify_password("lozinka", &upper));
        assert!(!verify_password("pogresna", &upper));
    }
}
