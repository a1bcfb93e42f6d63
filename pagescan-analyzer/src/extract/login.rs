use super::{Extractor, Page, TaskContext};
use crate::document::Document;
use crate::error::ExtractionError;
use crate::result::Partial;
use futures::FutureExt;
use futures::future::{self, BoxFuture};

pub struct LoginFormDetector;

/// True when the page has a password field and a submit/button control.
///
/// The two may sit anywhere in the document; they do not have to share a
/// `<form>`.
pub fn has_login_form(document: &Document) -> bool {
    let mut has_password = false;
    let mut has_submit = false;

    for node in document.elements() {
        let Some(kind) = node.attr("type") else {
            continue;
        };

        if kind.eq_ignore_ascii_case("password") {
            has_password = true;
        } else if kind.eq_ignore_ascii_case("submit") || kind.eq_ignore_ascii_case("button") {
            has_submit = true;
        }

        if has_password && has_submit {
            return true;
        }
    }

    false
}

impl Extractor for LoginFormDetector {
    fn name(&self) -> &'static str {
        "LoginForm"
    }

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        _ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>> {
        future::ready(Ok(Partial::LoginForm(has_login_form(&page.document)))).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(html: &str) -> bool {
        has_login_form(&Document::parse(html.as_bytes()).unwrap())
    }

    #[test]
    fn test_login_form() {
        assert!(detect(
            r#"<form><input type="text" name="user"><input type="password"><input type="submit"></form>"#
        ));
    }

    #[test]
    fn test_button_element() {
        assert!(detect(r#"<form><input type="password"><button type="button">Go</button></form>"#));
    }

    #[test]
    fn test_unrelated_password_and_button_still_match() {
        assert!(detect(
            r#"<body>
                <form id="settings"><input type="password"></form>
                <footer><button type="submit">Subscribe</button></footer>
            </body>"#
        ));
    }

    #[test]
    fn test_password_without_submit() {
        assert!(!detect(r#"<form><input type="password"></form>"#));
    }

    #[test]
    fn test_submit_without_password() {
        assert!(!detect(r#"<form><input type="email"><input type="submit"></form>"#));
    }

    #[test]
    fn test_type_value_is_case_insensitive() {
        assert!(detect(r#"<input type="PASSWORD"><input type="Submit">"#));
    }
}
