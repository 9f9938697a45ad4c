use bytes::Bytes;

use crate::client::ResourceClient;
use crate::error::DoubanError;
use crate::resources::{join_keywords, search_path};
use crate::urlencode::{encode_segment, urlencode};

impl ResourceClient {
    pub async fn book_by_id(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/{id}")).await
    }

    pub async fn book_by_isbn(&self, isbn: &str) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/isbn/{}", encode_segment(isbn))).await
    }

    pub async fn search_books<S: AsRef<str>>(
        &self,
        keywords: &[S],
        start: u32,
        count: u32,
    ) -> Result<Bytes, DoubanError> {
        let q = join_keywords(keywords);
        self.get(&search_path("/v2/book/search", "q", &q, start, count)).await
    }

    pub async fn search_books_by_tag(
        &self,
        tag: &str,
        start: u32,
        count: u32,
    ) -> Result<Bytes, DoubanError> {
        self.get(&search_path("/v2/book/search", "tag", tag, start, count)).await
    }

    pub async fn book_tags(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/{id}/tags")).await
    }

    /// All books a user has marked (read, reading, wish).
    pub async fn user_book_collections(&self, username: &str) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/user/{}/collections", encode_segment(username)))
            .await
    }

    /// A single user's collection entry for one book.
    pub async fn user_book_collection(
        &self,
        book_id: u64,
        username: &str,
    ) -> Result<Bytes, DoubanError> {
        let path = urlencode(
            &format!("/v2/book/{book_id}/collection"),
            [("user_id", username)],
        );
        self.get(&path).await
    }

    pub async fn user_annotations(&self, username: &str) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/user/{}/annotations", encode_segment(username)))
            .await
    }

    pub async fn book_annotations(&self, book_id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/{book_id}/annotations")).await
    }

    pub async fn annotation(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/book/annotation/{id}")).await
    }
}
