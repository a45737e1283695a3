//! Minimal page handlers behind the guard.
//!
//! Each page names itself and, when signed in, the current user. The guard has
//! already decided the caller may be here.

use axum::{extract::Extension, http::StatusCode, response::Html};

use crate::api::auth::Locals;

pub async fn home(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Vibe Check", &locals)
}

pub async fn login(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Log in", &locals)
}

pub async fn signup(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Sign up", &locals)
}

pub async fn get_started(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Get started", &locals)
}

pub async fn app(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Dashboard", &locals)
}

pub async fn admin(Extension(locals): Extension<Locals>) -> Html<String> {
    render("Admin", &locals)
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(page("Not found", "")))
}

fn render(title: &str, locals: &Locals) -> Html<String> {
    let greeting = locals.user.as_ref().map_or_else(String::new, |user| {
        format!("<p>Signed in as {}</p>", escape_html(&user.name))
    });
    Html(page(title, &greeting))
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1>{body}</body></html>"
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
