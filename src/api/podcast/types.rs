/// Query string of `GET /api/podcast`, read from the raw pairs so a repeated
/// key is visible. Both fields stay optional; the access check decides what a
/// missing secret means.
#[derive(Debug, Default, PartialEq)]
pub struct FeedQuery {
    pub slug: Option<String>,
    /// `None` when absent or given more than once.
    pub secret: Option<String>,
}

impl FeedQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = FeedQuery::default();
        let mut secrets = Vec::new();
        for (key, value) in pairs {
            match key.as_str() {
                "slug" if query.slug.is_none() => query.slug = Some(value),
                "secret" => secrets.push(value),
                _ => {}
            }
        }
        if secrets.len() == 1 {
            query.secret = secrets.pop();
        }
        query
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
