#![no_main]
use activator::api::client::HttpActivationApi;
use activator::core::token::ActivationToken;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|token: &str| {
    // Whatever the token, it is exactly one path segment under /users/activate
    let base = reqwest::Url::parse("http://localhost:8080/v1").unwrap();
    let api = HttpActivationApi::new(base, None).unwrap();
    let url = match api.endpoint(&ActivationToken::new(token)) {
        Ok(url) => url,
        Err(_) => {
            assert!(matches!(token, "." | ".."));
            return;
        }
    };
    let rest = url.path().strip_prefix("/v1/users/activate").unwrap();
    assert!(rest.starts_with('/'), "token segment missing: {}", url.path());
    assert_eq!(rest.matches('/').count(), 1);
});
