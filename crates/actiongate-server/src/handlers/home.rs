//! GET / — the home page.

pub async fn home() -> &'static str {
    "home"
}
