//! `<head>` markup for the generated favicon set.
//!
//! Uses [maud](https://maud.lambda.xyz/) like every other piece of HTML in
//! the crate: hrefs and titles are escaped on interpolation.

use super::files::{
    APPLE_TOUCH_ICON, FAVICON_ICO, FAVICON_PNG, FAVICON_SVG, WEB_APP_MANIFEST,
};
use crate::settings::FaviconSettings;
use maud::{Markup, html};

/// One fragment per `<link>`/`<meta>` element, in document order.
pub fn generate_html(settings: &FaviconSettings) -> Vec<Markup> {
    let mut fragments = vec![
        html! { link rel="icon" type="image/png" href=(settings.href(FAVICON_PNG)) sizes="96x96"; },
        html! { link rel="icon" type="image/svg+xml" href=(settings.href(FAVICON_SVG)); },
        html! { link rel="shortcut icon" href=(settings.href(FAVICON_ICO)); },
        html! { link rel="apple-touch-icon" sizes="180x180" href=(settings.href(APPLE_TOUCH_ICON)); },
    ];
    if let Some(title) = &settings.icon.touch.app_title {
        fragments.push(html! { meta name="apple-mobile-web-app-title" content=(title); });
    }
    fragments.push(html! { link rel="manifest" href=(settings.href(WEB_APP_MANIFEST)); });
    fragments
}
