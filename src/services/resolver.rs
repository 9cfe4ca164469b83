//! Entity resolution for one play record
//!
//! Lookup order is fixed: artist, then show, then song. Song lookup is keyed
//! by the resolved artist id, so an unresolved artist means the song is never
//! looked up at all. Resolution performs no store writes unless song creation
//! has been explicitly opted into.

use tracing::{debug, warn};

use crate::models::{PlayRecord, ResolutionOutcome};
use crate::store::{record_id, EntityKind, SearchTerm, StoreGateway};

/// Resolves play records against the store
pub struct EntityResolver<'a, G> {
    store: &'a G,
    create_songs: bool,
}

impl<'a, G: StoreGateway> EntityResolver<'a, G> {
    pub fn new(store: &'a G) -> Self {
        Self {
            store,
            create_songs: false,
        }
    }

    /// Opt into creating a song when its artist resolved but the song itself
    /// did not. Off by default: resolution should not write, and creating
    /// songs from unverified quiz metadata is a data-quality risk.
    pub fn create_songs(mut self, enabled: bool) -> Self {
        self.create_songs = enabled;
        self
    }

    /// Resolve one record. Lookup failures never propagate: a failed or empty
    /// search demotes the record with a missing descriptor and resolution
    /// moves on to the next entity.
    pub async fn resolve(&self, record: &PlayRecord) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::new(record.clone());

        // Artist: exact name match
        let artist_term = SearchTerm::new().exact("name", &record.artist);
        outcome.artist_id = self
            .find_id(EntityKind::Artist, &["id", "name"], &artist_term)
            .await;
        if outcome.artist_id.is_none() {
            outcome.missing.push(format!("artist: {}", record.artist));
        }

        // Show: case-insensitive name match plus vintage equality, both required
        let show_term = SearchTerm::new()
            .exact_ci("name", &record.show)
            .value("vintage", &record.vintage);
        outcome.show_id = self
            .find_id(EntityKind::Show, &["id", "name", "vintage"], &show_term)
            .await;
        if outcome.show_id.is_none() {
            outcome
                .missing
                .push(format!("show: {} ({})", record.show, record.vintage));
        }

        // Song: keyed by artist id, so only attempted when the artist resolved
        match outcome.artist_id.as_deref() {
            Some(artist_id) => {
                let song_term = SearchTerm::new()
                    .exact("name", &record.song)
                    .value("artist_id", artist_id);
                outcome.song_id = self
                    .find_id(EntityKind::Song, &["id", "name", "artist_id"], &song_term)
                    .await;

                if outcome.song_id.is_none() && self.create_songs {
                    outcome.song_id = self.create_song(record, artist_id).await;
                    outcome.created_song = outcome.song_id.is_some();
                }

                if outcome.song_id.is_none() {
                    outcome
                        .missing
                        .push(format!("song: {} by {}", record.song, record.artist));
                }
            }
            None => {
                outcome
                    .missing
                    .push(format!("song: {} (artist unresolved)", record.song));
            }
        }

        debug!(
            record = %record.label(),
            complete = outcome.is_complete(),
            "resolved record"
        );
        outcome
    }

    /// First matching record's id, or None on a miss or a failed search.
    /// Multiple matches are not an error: the store's result order decides.
    async fn find_id(
        &self,
        kind: EntityKind,
        fields: &[&str],
        term: &SearchTerm,
    ) -> Option<String> {
        match self.store.search(kind, fields, term).await {
            Ok(results) => results.first().and_then(record_id),
            Err(e) => {
                warn!(kind = kind.as_str(), error = %e, "search failed, treating as missing");
                None
            }
        }
    }

    async fn create_song(&self, record: &PlayRecord, artist_id: &str) -> Option<String> {
        match self
            .store
            .create(
                EntityKind::Song,
                &[("name", record.song.as_str()), ("artist_id", artist_id)],
            )
            .await
        {
            Ok(created) => {
                let id = created
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string);
                if id.is_none() {
                    warn!(song = %record.song, "song create response had no id");
                }
                id
            }
            Err(e) => {
                warn!(song = %record.song, error = %e, "song creation failed");
                None
            }
        }
    }
}
