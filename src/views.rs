//! HTML pages served by the app.

use axum::response::Html;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = "body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; } \
                     textarea { width: 100%; } \
                     pre { white-space: pre-wrap; background: #f4f4f4; padding: 1rem; }";

fn page(title: &str, body: Markup) -> Html<String> {
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    };
    Html(markup.into_string())
}

/// The submission form.
pub fn index() -> Html<String> {
    page(
        "quickpaste",
        html! {
            h1 { "New paste" }
            form method="post" action="/" {
                textarea name="text" rows="20" autofocus {}
                p { button type="submit" { "Paste" } }
            }
            p { "Pastes expire after 24 hours." }
        },
    )
}

pub fn paste(key: &str, text: &str) -> Html<String> {
    page(
        &format!("paste {key}"),
        html! {
            h1 { "Paste " (key) }
            pre { (text) }
            p { a href="/" { "New paste" } }
        },
    )
}

pub fn not_found() -> Html<String> {
    page(
        "not found",
        html! {
            h1 { "Paste not found" }
            p { "This paste does not exist or has expired." }
            p { a href="/" { "New paste" } }
        },
    )
}
