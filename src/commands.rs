// Command handlers for the page bridge
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audio::{PlaybackResource, PlaybackStatus};
use crate::library::Track;
use crate::mailing::{SignupError, Subscriber};
use crate::page::{BookContent, PageSnapshot};
use crate::reveal::{ElementId, LayoutSnapshot};
use crate::state::AppState;

// ===== Player Commands =====

pub fn toggle_play<R: PlaybackResource>(state: &AppState<R>) -> Result<PlaybackStatus, String> {
    let mut session = state.session.lock();
    session.pump();
    session.toggle_play();
    Ok(session.current_status())
}

pub fn select_and_play<R: PlaybackResource>(
    track_id: String,
    state: &AppState<R>,
) -> Result<PlaybackStatus, String> {
    let mut session = state.session.lock();
    if session.catalog().find(&track_id).is_none() {
        return Err(format!("Unknown track: {}", track_id));
    }

    session.pump();
    session.select_and_play(&track_id);
    Ok(session.current_status())
}

pub fn get_player_state<R: PlaybackResource>(
    state: &AppState<R>,
) -> Result<PlaybackStatus, String> {
    let mut session = state.session.lock();
    session.pump();
    Ok(session.current_status())
}

pub fn get_tracks<R: PlaybackResource>(state: &AppState<R>) -> Result<Vec<Track>, String> {
    Ok(state.session.lock().catalog().tracks().to_vec())
}

// ===== Page Commands =====

pub fn get_book<R: PlaybackResource>(state: &AppState<R>) -> Result<BookContent, String> {
    Ok(state.book.clone())
}

pub fn register_reveal<R: PlaybackResource>(
    element_id: String,
    state: &AppState<R>,
) -> Result<bool, String> {
    Ok(state.reveal.lock().register(&element_id))
}

pub fn is_revealed<R: PlaybackResource>(
    element_id: String,
    state: &AppState<R>,
) -> Result<bool, String> {
    Ok(state.reveal.lock().is_revealed(&element_id))
}

#[derive(Debug, Serialize)]
pub struct ScrollResponse {
    pub revealed: Vec<ElementId>,
    /// Elements the page still needs to measure on the next report
    pub pending: Vec<ElementId>,
    pub nav_solid: bool,
}

pub fn report_scroll<R: PlaybackResource>(
    layout: LayoutSnapshot,
    state: &AppState<R>,
) -> Result<ScrollResponse, String> {
    let revealed = state.on_scroll(layout.scroll_y, &layout, |_| {});
    Ok(scroll_response(revealed, state))
}

pub fn page_ready<R: PlaybackResource>(
    layout: LayoutSnapshot,
    state: &AppState<R>,
) -> Result<ScrollResponse, String> {
    let revealed = state.ready(layout.scroll_y, &layout, |_| {});
    Ok(scroll_response(revealed, state))
}

fn scroll_response<R: PlaybackResource>(
    revealed: Vec<ElementId>,
    state: &AppState<R>,
) -> ScrollResponse {
    ScrollResponse {
        revealed,
        pending: state.reveal.lock().pending().to_vec(),
        nav_solid: state.page.lock().nav_solid(),
    }
}

pub fn subscribe<R: PlaybackResource>(
    email: String,
    state: &AppState<R>,
) -> Result<Subscriber, String> {
    let subscriber = state
        .mailing
        .subscribe(&email, Utc::now())
        .map_err(|e| match e {
            SignupError::InvalidEmail => e.to_string(),
            other => format!("Failed to save signup: {}", other),
        })?;

    state.mark_subscribed();
    Ok(subscriber)
}

pub fn open_excerpt<R: PlaybackResource>(state: &AppState<R>) -> Result<PageSnapshot, String> {
    let mut page = state.page.lock();
    page.open_excerpt();
    Ok(page.snapshot(Utc::now()))
}

pub fn close_excerpt<R: PlaybackResource>(state: &AppState<R>) -> Result<PageSnapshot, String> {
    let mut page = state.page.lock();
    page.close_excerpt();
    Ok(page.snapshot(Utc::now()))
}

pub fn get_page_state<R: PlaybackResource>(state: &AppState<R>) -> Result<PageSnapshot, String> {
    Ok(state.page.lock().snapshot(Utc::now()))
}

// ===== Bridge =====

/// A request from the page, e.g. `{"command":"select_and_play","track_id":"amara-preview"}`
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    TogglePlay,
    SelectAndPlay { track_id: String },
    GetPlayerState,
    GetTracks,
    GetBook,
    RegisterReveal { element_id: String },
    IsRevealed { element_id: String },
    PageReady { layout: LayoutSnapshot },
    ReportScroll { layout: LayoutSnapshot },
    Subscribe { email: String },
    OpenExcerpt,
    CloseExcerpt,
    GetPageState,
}

/// Decode one JSON request, run it, and encode the response
pub fn dispatch<R: PlaybackResource>(request: &str, state: &AppState<R>) -> Result<Value, String> {
    let command: Command =
        serde_json::from_str(request).map_err(|e| format!("Invalid command: {}", e))?;

    match command {
        Command::TogglePlay => to_value(toggle_play(state)?),
        Command::SelectAndPlay { track_id } => to_value(select_and_play(track_id, state)?),
        Command::GetPlayerState => to_value(get_player_state(state)?),
        Command::GetTracks => to_value(get_tracks(state)?),
        Command::GetBook => to_value(get_book(state)?),
        Command::RegisterReveal { element_id } => to_value(register_reveal(element_id, state)?),
        Command::IsRevealed { element_id } => to_value(is_revealed(element_id, state)?),
        Command::PageReady { layout } => to_value(page_ready(layout, state)?),
        Command::ReportScroll { layout } => to_value(report_scroll(layout, state)?),
        Command::Subscribe { email } => to_value(subscribe(email, state)?),
        Command::OpenExcerpt => to_value(open_excerpt(state)?),
        Command::CloseExcerpt => to_value(close_excerpt(state)?),
        Command::GetPageState => to_value(get_page_state(state)?),
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| format!("Failed to serialize response: {}", e))
}
