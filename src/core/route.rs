use percent_encoding::percent_decode_str;

use super::token::ActivationToken;

/// Root path the view navigates to after a successful activation.
pub const HOME_PATH: &str = "/";
/// Path prefix of the confirmation page; the token is the segment after it.
pub const CONFIRM_PREFIX: &str = "confirm";

#[derive(Debug, Clone)]
pub enum Route {
    Home,
    Confirmation { token: Option<ActivationToken> },
    NotFound(String),
}

impl Route {
    /// Parse an application path such as `/confirm/abc123`.
    ///
    /// Query strings and fragments are dropped. A missing or empty token
    /// segment yields `token: None`. The token segment is percent-decoded
    /// after splitting, so `%2F` stays inside the token; a segment that does
    /// not decode to UTF-8 is kept as written.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        match segments.next() {
            None | Some("") => Route::Home,
            Some(CONFIRM_PREFIX) => {
                let rest = segments.next().unwrap_or_default();
                let rest = rest.strip_suffix('/').unwrap_or(rest);
                if rest.contains('/') {
                    Route::NotFound(path.to_string())
                } else if rest.is_empty() {
                    Route::Confirmation { token: None }
                } else {
                    Route::Confirmation {
                        token: Some(decode_segment(rest)),
                    }
                }
            }
            Some(_) => Route::NotFound(path.to_string()),
        }
    }

    /// Route for a token handed over directly instead of through a path.
    pub fn confirmation(token: Option<ActivationToken>) -> Route {
        Route::Confirmation {
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Confirmation { .. } => "Confirmation Page",
            Route::NotFound(_) => "Not Found",
        }
    }
}

fn decode_segment(raw: &str) -> ActivationToken {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => ActivationToken::new(decoded.into_owned()),
        Err(_) => ActivationToken::new(raw),
    }
}
