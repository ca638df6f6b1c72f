use crate::core::{Album, RawAlbum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_COVER_SERVICE: &str = "https://picsum.photos/200";

/// Lower bound of the cover number, inclusive.
pub const COVER_MIN: u32 = 1;
/// Upper bound of the cover number, exclusive.
pub const COVER_MAX: u32 = 500;

pub fn build_cover_url(base: &str, n: u32) -> String {
    format!("{}?{}", base, n)
}

/// Gives every decoded album a random cover picture.
pub struct CoverAugmenter {
    base_url: String,
    rng: SmallRng,
}

impl CoverAugmenter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(base_url: impl Into<String>, seed: u64) -> Self {
        Self {
            base_url: base_url.into(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn augment(&mut self, raw: RawAlbum) -> Album {
        let n = self.rng.random_range(COVER_MIN..COVER_MAX);
        Album::from_raw(raw, build_cover_url(&self.base_url, n))
    }

    pub fn augment_all(&mut self, raws: Vec<RawAlbum>) -> Vec<Album> {
        raws.into_iter().map(|raw| self.augment(raw)).collect()
    }
}

impl Default for CoverAugmenter {
    fn default() -> Self {
        Self::new(DEFAULT_COVER_SERVICE)
    }
}

/// 從封面網址取回隨機數字，格式不符時回傳 None
pub fn cover_number(base: &str, cover_ref: &str) -> Option<u32> {
    cover_ref
        .strip_prefix(base)?
        .strip_prefix('?')?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str) -> RawAlbum {
        RawAlbum {
            title: title.to_string(),
            artist: "X".to_string(),
            year: 2000,
            genre: "Rock".to_string(),
        }
    }

    #[test]
    fn test_build_cover_url() {
        assert_eq!(
            build_cover_url(DEFAULT_COVER_SERVICE, 42),
            "https://picsum.photos/200?42"
        );
    }

    #[test]
    fn test_augment_keeps_fields_and_sets_cover() {
        let mut augmenter = CoverAugmenter::default();
        let album = augmenter.augment(raw("A"));

        assert_eq!(album.title, "A");
        assert_eq!(album.creator, "X");
        assert_eq!(album.year, 2000);
        assert_eq!(album.category, "Rock");
        assert!(!album.cover_ref.is_empty());
    }

    #[test]
    fn test_cover_number_always_in_range() {
        let mut augmenter = CoverAugmenter::with_seed(DEFAULT_COVER_SERVICE, 7);

        for i in 0..2000 {
            let album = augmenter.augment(raw(&format!("album {}", i)));
            let n = cover_number(DEFAULT_COVER_SERVICE, &album.cover_ref).unwrap();
            assert!((COVER_MIN..COVER_MAX).contains(&n), "out of range: {}", n);
        }
    }

    #[test]
    fn test_augment_all_preserves_order() {
        let mut augmenter = CoverAugmenter::new("http://covers.test/200");
        let albums = augmenter.augment_all(vec![raw("1"), raw("2"), raw("3")]);

        let titles: Vec<&str> = albums.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["1", "2", "3"]);
        assert!(albums
            .iter()
            .all(|a| cover_number("http://covers.test/200", &a.cover_ref).is_some()));
    }

    #[test]
    fn test_cover_number_rejects_foreign_urls() {
        assert_eq!(cover_number(DEFAULT_COVER_SERVICE, "https://other/200?3"), None);
        assert_eq!(cover_number(DEFAULT_COVER_SERVICE, "https://picsum.photos/200"), None);
        assert_eq!(cover_number(DEFAULT_COVER_SERVICE, "https://picsum.photos/200?x"), None);
    }
}
