use maud::{html, Markup};

use crate::{
    routes::{API_ROUTES, RANGE_ROUTES},
    templates::layouts::{base, PageConfig},
};

pub fn home_page(api_base: &str, window_days: i64) -> Markup {
    let config = PageConfig {
        title: "Climate API",
        api_base,
    };

    base(&config, content(api_base, window_days))
}

fn content(api_base: &str, window_days: i64) -> Markup {
    html! {
        div class="content" {
            h2 class="subtitle" { "Welcome!" }
            p {
                "Daily precipitation and temperature observations per station. "
                "Rolling series cover the " (window_days) " days up to the most recent measurement."
            }
            strong { "Available API routes:" }
            ul {
                @for (route, description) in API_ROUTES {
                    li {
                        a href=(format!("{}{}", api_base, route)) { (route) }
                        " - " (description)
                    }
                }
                @for (route, description) in RANGE_ROUTES {
                    li {
                        code { (route) }
                        " - " (description)
                    }
                }
            }
            p { "Dates use the YYYY-MM-DD format." }
        }
    }
}
