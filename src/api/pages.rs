//! Server-rendered pages.
//!
//! Templates live in `assets/templates` and are compiled into the binary.
//! Placeholders use `{{name}}`; every value substituted from user data is
//! HTML-escaped first.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use rust_embed::RustEmbed;
use std::fmt::Write as _;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{NextQuery, session_user};
use super::flash::{self, Flash};
use super::AppState;
use crate::domain::CurrentUser;
use crate::models::Roster;
use crate::services::RosterError;

#[derive(RustEmbed)]
#[folder = "assets/templates"]
struct Templates;

/// Failure of a page handler, rendered as the matching fallback page.
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(String),
}

impl From<RosterError> for PageError {
    fn from(err: RosterError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                let body = render_bare("404.html").unwrap_or_else(|| "404 Not Found".to_string());
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            Self::Internal(msg) => {
                tracing::error!("Page error: {}", msg);
                let body = render_bare("500.html")
                    .unwrap_or_else(|| "500 Internal Server Error".to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}

fn template(name: &str) -> Option<String> {
    Templates::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned())
}

/// Single pass over the template, so substituted text is never rescanned.
/// Unknown placeholders are left as they are.
fn substitute(source: String, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source.as_str();

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn render_bare(name: &str) -> Option<String> {
    let content = template(name)?;
    let layout = template("layout.html")?;
    Some(substitute(
        layout,
        &[
            ("title", "Courtside"),
            ("nav", ""),
            ("flashes", ""),
            ("content", content.as_str()),
        ],
    ))
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes.iter().fold(String::new(), |mut out, f| {
        let _ = write!(
            out,
            r#"<div class="flash {}">{}</div>"#,
            f.level.css_class(),
            html_escape::encode_text(&f.message)
        );
        out
    })
}

fn render_nav(user: Option<&CurrentUser>) -> String {
    user.map_or_else(String::new, |user| {
        format!(
            r#"<nav><a href="/">Home</a><a href="/armar_equipo">Build a team</a><a href="/mis_equipos">My teams</a><span class="user">{}</span><a href="/logout">Log out</a></nav>"#,
            html_escape::encode_text(&user.username)
        )
    })
}

/// Render `name` inside the layout, draining pending flash messages.
async fn render_page(
    session: &Session,
    user: Option<&CurrentUser>,
    title: &str,
    name: &str,
    vars: &[(&str, &str)],
) -> Result<Html<String>, PageError> {
    let content = template(name)
        .ok_or_else(|| PageError::Internal(format!("Missing template {name}")))?;
    let layout = template("layout.html")
        .ok_or_else(|| PageError::Internal("Missing template layout.html".to_string()))?;

    let content = substitute(content, vars);
    let flashes = render_flashes(&flash::take(session).await);
    let nav = render_nav(user);

    Ok(Html(substitute(
        layout,
        &[
            ("title", title),
            ("nav", nav.as_str()),
            ("flashes", flashes.as_str()),
            ("content", content.as_str()),
        ],
    )))
}

fn render_rosters(rosters: &[Roster]) -> String {
    if rosters.is_empty() {
        return r#"<p class="empty">You have not saved any teams yet. <a href="/armar_equipo">Build one</a>.</p>"#
            .to_string();
    }

    rosters.iter().fold(String::new(), |mut out, roster| {
        let _ = write!(
            out,
            r#"<article class="roster"><header><h3>{}</h3><span class="badge">{}</span><time>{}</time></header><ul>"#,
            html_escape::encode_text(&roster.name),
            html_escape::encode_text(&roster.roster_type),
            roster.created_at.format("%Y-%m-%d %H:%M"),
        );
        for player in &roster.players {
            let _ = write!(
                out,
                "<li><strong>{}</strong> {} &middot; {} &middot; {:.1} PPG</li>",
                html_escape::encode_text(&player.position),
                html_escape::encode_text(&player.name),
                html_escape::encode_text(&player.team),
                player.points_per_game,
            );
        }
        out.push_str("</ul></article>");
        out
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    session: Session,
    Query(query): Query<NextQuery>,
) -> Result<Response, PageError> {
    if session_user(&session).await.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let action = query.next.as_deref().map_or_else(
        || "/login".to_string(),
        |next| format!("/login?next={}", urlencoding::encode(next)),
    );
    let action = html_escape::encode_double_quoted_attribute(&action).into_owned();

    Ok(render_page(&session, None, "Log in", "login.html", &[("action", action.as_str())])
        .await?
        .into_response())
}

/// GET /
pub async fn index(user: CurrentUser, session: Session) -> Result<Html<String>, PageError> {
    let username = html_escape::encode_text(&user.username).into_owned();
    render_page(
        &session,
        Some(&user),
        "Courtside",
        "index.html",
        &[("username", username.as_str())],
    )
    .await
}

/// GET /armar_equipo
pub async fn roster_builder(
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, PageError> {
    render_page(&session, Some(&user), "Build a team", "armar_equipo.html", &[]).await
}

/// GET /mis_equipos
pub async fn my_rosters(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    session: Session,
) -> Result<Html<String>, PageError> {
    let rosters = state.roster_service().list_rosters_for_owner(user.id).await?;
    let list = render_rosters(&rosters);
    render_page(
        &session,
        Some(&user),
        "My teams",
        "mis_equipos.html",
        &[("rosters", list.as_str())],
    )
    .await
}

/// Fallback for every unmatched route.
pub async fn not_found() -> PageError {
    PageError::NotFound
}
