mod album;
mod history;
mod ids;
mod lyrics;
mod playlist;
mod search;
mod track;

pub use album::Album;
pub use history::HistoryEntry;
pub use ids::{AlbumId, PlaylistId, TrackId};
pub use lyrics::{LyricLine, LyricsDocument, LYRICS_UNAVAILABLE_TEXT};
pub use playlist::{NewPlaylist, Playlist, PlaylistUpdate};
pub use search::{Artist, SearchResults};
pub use track::Track;
