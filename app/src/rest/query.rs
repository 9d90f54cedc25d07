#[derive(serde::Serialize, serde::Deserialize)]
pub struct RecentQuery {
    limit: Option<i64>,
}

impl RecentQuery {
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }
}
