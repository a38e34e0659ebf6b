//! The navigation shell wrapped around every protected view.

use std::fmt::Write as _;

use inline_colorization::*;

use crate::models::AuthenticatedUser;
use crate::navigation::Route;

/// Menu plus the identity line. `active` is highlighted.
pub fn render(active: Route, user: Option<&AuthenticatedUser>) -> String {
    let mut out = String::new();
    let who = user
        .map(|u| u.identifier.as_str())
        .unwrap_or("unknown user");
    let _ = writeln!(out, "{style_bold}PhishGuard{style_reset}  signed in as {}", who);
    let items: Vec<String> = Route::MENU
        .iter()
        .map(|route| {
            if *route == active {
                format!("{style_bold}{color_cyan}[{}]{color_reset}{style_reset}", route.title())
            } else {
                route.title().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}  |  Log out", items.join("  |  "));
    out
}
