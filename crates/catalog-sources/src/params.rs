use catalog_models::ContentType;

/// Query for `/api/anime/search`. Unset fields are left out of the request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub genres: Vec<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub content_type: Option<ContentType>,
    pub rating: Option<String>,
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

impl SearchParams {
    pub fn text(query: impl Into<String>, limit: u32) -> Self {
        Self {
            query: Some(query.into()),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Requested page size, used by the "full page" heuristic
    pub fn effective_limit(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(q) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query.push(("q", q.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if !self.genres.is_empty() {
            let joined = self
                .genres
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("genres", joined));
        }
        let optional = [
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("status", &self.status),
            ("rating", &self.rating),
            ("order_by", &self.order_by),
            ("sort", &self.sort),
        ];
        for (key, value) in optional {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                query.push((key, v.to_string()));
            }
        }
        if let Some(content_type) = self.content_type {
            query.push(("type", content_type.as_str().to_string()));
        }
        query
    }
}
