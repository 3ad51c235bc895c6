//! # API Facade
//!
//! A thin, transport-agnostic layer over the [`Registry`]. It applies the request-level rules
//! a network front end needs and translates entities into the public wire schema.
//!
//! ## What Lives Here
//!
//! - **Lookup by name**: unknown repositories are `UnknownRepository`.
//! - **Bounds**: random sampling accepts 1 to [`MAX_COUNT`] items per request.
//! - **Categories**: `"generic"` / `"anime"`, matched against the metadata tag.
//! - **Not found**: point lookups and removals of absent ids are `NotFound`.
//! - **Payload decoding**: uploads arrive base64-encoded.
//!
//! ## What Does Not
//!
//! Storage semantics. Those belong to [`crate::store::Repository`]; this module never
//! touches disk itself.

use crate::error::{NeroError, Result};
use crate::meta::{Metadata, MetadataKind};
use crate::model::{Format, Media};
use crate::registry::Registry;
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 20;

/// The public shape of a media entity. The storage path is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaView {
    pub id: Uuid,
    pub format: Format,
    pub meta: Option<Metadata>,
}

impl From<Media> for MediaView {
    fn from(media: Media) -> Self {
        Self {
            id: media.id,
            format: media.format,
            meta: media.meta,
        }
    }
}

pub struct NeroApi {
    registry: Registry,
}

impl NeroApi {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn get(&self, repo: &str, id: &Uuid) -> Result<MediaView> {
        self.media(repo, id).map(MediaView::from)
    }

    /// Where the asset bytes for `id` live, for callers that stream the file.
    pub fn asset_path(&self, repo: &str, id: &Uuid) -> Result<PathBuf> {
        self.media(repo, id).map(|media| media.path)
    }

    pub fn list(&self, repo: &str) -> Result<Vec<MediaView>> {
        let repo = self.registry.get(repo)?;
        Ok(repo.items().into_iter().map(MediaView::from).collect())
    }

    pub fn random(&self, repo: &str, count: usize) -> Result<Vec<MediaView>> {
        check_count(count)?;
        let repo = self.registry.get(repo)?;
        Ok(repo.random(count).into_iter().map(MediaView::from).collect())
    }

    pub fn random_by_category(
        &self,
        repo: &str,
        category: &str,
        count: usize,
    ) -> Result<Vec<MediaView>> {
        self.random_by_category_with(repo, category, count, &mut rand::thread_rng())
    }

    /// Like [`NeroApi::random_by_category`], drawing from the given generator.
    pub fn random_by_category_with<R: Rng + ?Sized>(
        &self,
        repo: &str,
        category: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<MediaView>> {
        check_count(count)?;
        let kind: MetadataKind = category.parse().map_err(NeroError::InvalidRequest)?;
        let repo = self.registry.get(repo)?;

        let picked = repo.random_matching_with(count, rng, |media| {
            media.meta.as_ref().map(Metadata::kind) == Some(kind)
        });
        Ok(picked.into_iter().map(MediaView::from).collect())
    }

    /// Decodes a standard base64 payload and stores it.
    pub fn upload(&self, repo: &str, data: &str, meta: Option<Metadata>) -> Result<MediaView> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|_| NeroError::InvalidRequest("failed to decode data".to_string()))?;
        self.upload_bytes(repo, &bytes, meta)
    }

    pub fn upload_bytes(
        &self,
        repo: &str,
        bytes: &[u8],
        meta: Option<Metadata>,
    ) -> Result<MediaView> {
        let repo = self.registry.get(repo)?;
        repo.create(bytes, meta).map(MediaView::from)
    }

    pub fn remove(&self, repo: &str, id: &Uuid) -> Result<MediaView> {
        let repo = self.registry.get(repo)?;
        repo.remove(id)?
            .map(MediaView::from)
            .ok_or(NeroError::NotFound(*id))
    }

    fn media(&self, repo: &str, id: &Uuid) -> Result<Media> {
        self.registry
            .get(repo)?
            .get(id)
            .ok_or(NeroError::NotFound(*id))
    }
}

fn check_count(count: usize) -> Result<()> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(NeroError::InvalidRequest(format!(
            "count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, count
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::Repository;
    use crate::test_utils::{virtual_media, TestEnv, GIF_BYTES};

    fn memory_api() -> NeroApi {
        let mut registry = Registry::new();
        registry.insert(Repository::memory("mem")).unwrap();
        NeroApi::new(registry)
    }

    fn add(api: &NeroApi, meta: Option<Metadata>) -> Media {
        let mut media = virtual_media("/virtual/x");
        media.meta = meta;
        api.registry().get("mem").unwrap().add(media.clone()).unwrap();
        media
    }

    #[test]
    fn test_view_hides_path() {
        let media = virtual_media("/secret/location");
        let value = serde_json::to_value(MediaView::from(media)).unwrap();
        assert!(value.get("path").is_none());
        assert_eq!(value["format"], "unknown");
        assert!(value["meta"].is_null());
    }

    #[test]
    fn test_get_and_not_found() {
        let api = memory_api();
        let media = add(&api, None);

        assert_eq!(api.get("mem", &media.id).unwrap().id, media.id);
        let err = api.get("mem", &Uuid::new_v4()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_repository() {
        let api = memory_api();
        let err = api.list("other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownRepository);
    }

    #[test]
    fn test_random_bounds() {
        let api = memory_api();
        add(&api, None);

        assert_eq!(
            api.random("mem", 0).unwrap_err().kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            api.random("mem", MAX_COUNT + 1).unwrap_err().kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(api.random("mem", MAX_COUNT).unwrap().len(), 1);
    }

    #[test]
    fn test_random_by_category_filters_on_meta_kind() {
        let api = memory_api();
        let anime = add(&api, Some(Metadata::anime(Some("Frieren".to_string()))));
        add(&api, Some(Metadata::generic(None, None, None)));
        add(&api, None);

        let picked = api.random_by_category("mem", "anime", 5).unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, anime.id);

        let err = api.random_by_category("mem", "video", 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_random_by_category_is_reproducible_with_seed() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let api = memory_api();
        for _ in 0..8 {
            add(&api, Some(Metadata::generic(None, None, None)));
            add(&api, Some(Metadata::anime(None)));
        }

        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            api.random_by_category_with("mem", "generic", 3, &mut rng)
                .unwrap()
                .into_iter()
                .map(|view| view.id)
                .collect::<Vec<_>>()
        };

        let first = draw(7);
        assert_eq!(first.len(), 3);
        assert_eq!(first, draw(7));

        let repo = api.registry().get("mem").unwrap();
        for id in &first {
            let meta = repo.get(id).unwrap().meta.unwrap();
            assert_eq!(meta.kind(), MetadataKind::Generic);
        }
    }

    #[test]
    fn test_upload_rejects_bad_base64() {
        let api = memory_api();
        let err = api.upload("mem", "!!not base64!!", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_upload_decodes_and_creates() {
        let env = TestEnv::new();
        let mut registry = Registry::new();
        registry.insert(env.open()).unwrap();
        let api = NeroApi::new(registry);

        let data = base64::engine::general_purpose::STANDARD.encode(GIF_BYTES);
        let view = api
            .upload("test", &data, Some(Metadata::anime(None)))
            .unwrap();

        assert_eq!(view.format, Format::AnimatedImage);
        assert_eq!(view.meta, Some(Metadata::anime(None)));
        let path = api.asset_path("test", &view.id).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), GIF_BYTES);
    }

    #[test]
    fn test_upload_to_memory_repository_is_unsupported() {
        let api = memory_api();
        let err = api.upload_bytes("mem", GIF_BYTES, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn test_remove_absent_is_not_found() {
        let api = memory_api();
        let media = add(&api, None);

        assert_eq!(api.remove("mem", &media.id).unwrap().id, media.id);
        assert_eq!(
            api.remove("mem", &media.id).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
