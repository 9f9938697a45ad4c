use bytes::Bytes;

use crate::client::ResourceClient;
use crate::error::DoubanError;
use crate::resources::{join_keywords, search_path};

impl ResourceClient {
    pub async fn movie(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/subject/{id}")).await
    }

    pub async fn movie_photos(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/subject/{id}/photos")).await
    }

    pub async fn movie_reviews(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/subject/{id}/reviews")).await
    }

    pub async fn movie_comments(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/subject/{id}/comments")).await
    }

    pub async fn celebrity(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/celebrity/{id}")).await
    }

    pub async fn celebrity_photos(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/celebrity/{id}/photos")).await
    }

    pub async fn celebrity_works(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/movie/celebrity/{id}/works")).await
    }

    pub async fn search_movies<S: AsRef<str>>(
        &self,
        keywords: &[S],
        start: u32,
        count: u32,
    ) -> Result<Bytes, DoubanError> {
        let q = join_keywords(keywords);
        self.get(&search_path("/v2/movie/search", "q", &q, start, count)).await
    }

    pub async fn search_movies_by_tag(
        &self,
        tag: &str,
        start: u32,
        count: u32,
    ) -> Result<Bytes, DoubanError> {
        self.get(&search_path("/v2/movie/search", "tag", tag, start, count)).await
    }

    pub async fn now_playing(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/nowplaying").await
    }

    pub async fn coming_soon(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/coming").await
    }

    pub async fn top250(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/top250").await
    }

    /// Weekly word-of-mouth chart.
    pub async fn weekly(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/weekly").await
    }

    /// North American box office chart.
    pub async fn us_box(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/us_box").await
    }

    pub async fn new_movies(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/movie/new_movies").await
    }
}
