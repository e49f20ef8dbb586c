//! Minimal server-rendered pages.
//!
//! Hand-built HTML keeps the rendering surface tiny; anything user-controlled
//! goes through [`escape_html`] before interpolation.

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - gatepass</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}

fn error_fragment(error: Option<&str>) -> String {
    error.map_or_else(String::new, |message| {
        format!("<p class=\"error\">{}</p>\n", escape_html(message))
    })
}

pub fn home_page() -> String {
    page(
        "Home",
        "<h1>Welcome</h1>\n\
         <p><a href=\"/login\">Log in</a> or <a href=\"/signup\">create an account</a>.</p>",
    )
}

pub fn signup_page(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Create account</h1>\n{}\
         <form method=\"post\" action=\"/signup\">\n\
         <input type=\"text\" name=\"username\" placeholder=\"Username\" required>\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Sign up</button>\n\
         </form>\n\
         <p><a href=\"/login\">Already have an account?</a></p>",
        error_fragment(error)
    );
    page("Sign up", &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        "<h1>Log in</h1>\n{}\
         <form method=\"post\" action=\"/login\">\n\
         <input type=\"text\" name=\"username\" placeholder=\"Username\" required>\n\
         <input type=\"password\" name=\"password\" placeholder=\"Password\" required>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p><a href=\"/signup\">Need an account?</a></p>",
        error_fragment(error)
    );
    page("Log in", &body)
}

pub fn dashboard_page(username: &str) -> String {
    let body = format!(
        "<h1>Dashboard</h1>\n\
         <p>Logged in as {}</p>\n\
         <p><a href=\"/logout\">Log out</a></p>",
        escape_html(username)
    );
    page("Dashboard", &body)
}

pub fn server_error_page() -> String {
    page(
        "Error",
        "<h1>Something went wrong</h1>\n<p>Please try again later.</p>",
    )
}

/// Escape the five HTML metacharacters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a&b\"c"), "a&amp;b&quot;c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn dashboard_contains_escaped_username() {
        let html = dashboard_page("al<ice");
        assert!(html.contains("al&lt;ice"));
        assert!(!html.contains("al<ice"));
    }

    #[test]
    fn forms_post_to_their_own_route() {
        assert!(signup_page(None).contains("action=\"/signup\""));
        assert!(login_page(None).contains("action=\"/login\""));
    }

    #[test]
    fn error_message_is_rendered_inline() {
        let html = login_page(Some("Invalid username or password"));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("Invalid username or password"));
        assert!(!login_page(None).contains("class=\"error\""));
    }
}
