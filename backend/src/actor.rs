use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

/// Header carrying the id of the staff member performing the request.
pub const USER_HEADER: &str = "X-User-Id";

/// The acting user, when the caller identified one.
///
/// Used to stamp audit fields such as `lastUpdatedBy` and `reviewedBy`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Actor(pub Option<String>);

impl Actor {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for Actor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from);
        ready(Ok(Actor(id)))
    }
}
