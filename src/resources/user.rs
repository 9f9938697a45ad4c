use bytes::Bytes;

use crate::client::ResourceClient;
use crate::error::DoubanError;
use crate::resources::{join_keywords, search_path};
use crate::urlencode::encode_segment;

impl ResourceClient {
    /// Profile of the authorized user.
    pub async fn me(&self) -> Result<Bytes, DoubanError> {
        self.get("/v2/user/~me").await
    }

    pub async fn user_by_id(&self, id: u64) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/user/{id}")).await
    }

    pub async fn user_by_name(&self, username: &str) -> Result<Bytes, DoubanError> {
        self.get(&format!("/v2/user/{}", encode_segment(username))).await
    }

    pub async fn search_users<S: AsRef<str>>(
        &self,
        keywords: &[S],
        start: u32,
        count: u32,
    ) -> Result<Bytes, DoubanError> {
        let q = join_keywords(keywords);
        self.get(&search_path("/v2/user", "q", &q, start, count)).await
    }
}
