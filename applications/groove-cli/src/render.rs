/// Plain-text rendering of view models
use groove_client::{CatalogArtist, CatalogPlaylist, Device};
use groove_core::UserProfile;
use groove_playback::{PlayerDisplay, Screen, Source, TrackRow};

/// Track list, one row per line
///
/// The playing row is marked with `>`, a selected but paused row with `*`.
pub fn track_list(rows: &[TrackRow]) -> String {
    if rows.is_empty() {
        return "No tracks found".to_string();
    }

    rows.iter()
        .map(|row| {
            let marker = if row.is_playing {
                '>'
            } else if row.is_current {
                '*'
            } else {
                ' '
            };
            format!(
                "{} {:>2}. {} - {} [{}] {}",
                marker, row.position, row.title, row.artist, row.album, row.duration_label
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn artist_list(artists: &[CatalogArtist]) -> String {
    artists
        .iter()
        .map(|a| format!("  {} ({} followers)", a.name, a.followers.total))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn playlist_list(playlists: &[CatalogPlaylist]) -> String {
    playlists
        .iter()
        .map(|p| {
            let owner = p.owner.display_name.as_deref().unwrap_or(&p.owner.id);
            format!("  {} by {}", p.name, owner)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn device_list(devices: &[Device]) -> String {
    if devices.is_empty() {
        return "No devices available".to_string();
    }

    devices
        .iter()
        .map(|d| {
            let active = if d.is_active { " (active)" } else { "" };
            format!("  {} [{}]{}", d.name, d.device_type, active)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Player bar as one line
pub fn player_bar(display: Option<&PlayerDisplay>) -> String {
    let Some(display) = display else {
        return "Nothing playing".to_string();
    };

    let state = if display.is_playing { "Playing" } else { "Paused" };
    let source = match display.source {
        Source::Remote => "device",
        Source::Local => "local",
    };
    let volume = if display.muted {
        "muted".to_string()
    } else {
        format!("vol {}%", display.volume_percent)
    };

    format!(
        "{}: {} - {}  {} / {}  ({}, {})",
        state, display.title, display.artist, display.elapsed, display.total, source, volume
    )
}

/// Account summary, with the screen the web player would route to
pub fn account(user: Option<&UserProfile>, screen: Screen) -> String {
    let route = match screen {
        Screen::Loading => "loading",
        Screen::Login => "signed out; run `groove login`",
        Screen::PremiumRequired => "premium required for playback",
        Screen::Main => "ready",
    };

    match user {
        Some(user) => format!(
            "{} <{}> ({} account): {}",
            user.display_name, user.email, user.product, route
        ),
        None => format!("Not signed in: {}", route),
    }
}
