/// Terminal formatting helpers
use encore_core::{LyricsDocument, SearchResults, Track};
use encore_playback::{Notification, PlayerSnapshot, Severity};

/// Format whole seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One-line track description
pub fn track_line(track: &Track) -> String {
    format!(
        "#{:<3} {} - {} ({})",
        track.id.get(),
        track.title,
        track.artist,
        format_time(track.duration)
    )
}

/// Progress line for the current snapshot
pub fn progress_line(snapshot: &PlayerSnapshot) -> Option<String> {
    let track = snapshot.current_track.as_ref()?;
    let state = if snapshot.is_playing { ">" } else { "||" };
    let preview = if snapshot.is_authenticated { "" } else { " [preview]" };

    Some(format!(
        "{} {} - {} [{} / {}]{}",
        state,
        track.title,
        track.artist,
        format_time(snapshot.elapsed),
        format_time(snapshot.effective_duration),
        preview
    ))
}

/// Lyric line to show at the snapshot's elapsed time
pub fn current_lyric(snapshot: &PlayerSnapshot) -> Option<&str> {
    let lyrics = snapshot.lyrics.as_ref()?;
    let index = snapshot.active_lyric_line?;
    lyrics.lines.get(index).map(|line| line.text.as_str())
}

/// Toast-style rendering of a notification
pub fn notification_line(notification: &Notification) -> String {
    let tag = match notification.severity() {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    format!("[{}] {}", tag, notification.message())
}

/// Multi-line rendering of search results
pub fn search_report(results: &SearchResults) -> String {
    if results.is_empty() {
        return "No results".to_string();
    }

    let mut out = Vec::new();
    if !results.tracks.is_empty() {
        out.push("Tracks:".to_string());
        out.extend(results.tracks.iter().map(|t| format!("  {}", track_line(t))));
    }
    if !results.artists.is_empty() {
        out.push("Artists:".to_string());
        out.extend(
            results
                .artists
                .iter()
                .map(|a| format!("  {} ({} tracks)", a.name, a.track_count)),
        );
    }
    if !results.albums.is_empty() {
        out.push("Albums:".to_string());
        out.extend(
            results
                .albums
                .iter()
                .map(|a| format!("  #{:<3} {} - {}", a.id.get(), a.title, a.artist)),
        );
    }
    if !results.playlists.is_empty() {
        out.push("Playlists:".to_string());
        out.extend(
            results
                .playlists
                .iter()
                .map(|p| format!("  #{:<3} {}", p.id.get(), p.title)),
        );
    }
    out.join("\n")
}

/// Timed lyric listing
pub fn lyrics_report(document: &LyricsDocument) -> String {
    let mut out = vec![format!("{} - {}", document.title, document.artist)];
    out.extend(
        document
            .lines
            .iter()
            .map(|line| format!("  [{}] {}", format_time(line.time), line.text)),
    );
    out.join("\n")
}
