use serde::Deserialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_SORT_BY: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw paging options as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub skip: u64,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for Pagination {
    fn default() -> Self {
        calculate_pagination(&PaginationOptions::default())
    }
}

/// Resolves page/limit into a skip/take pair and fills in sort defaults.
pub fn calculate_pagination(options: &PaginationOptions) -> Pagination {
    let page = parse_positive(options.page.as_deref()).unwrap_or(DEFAULT_PAGE);
    let limit = parse_positive(options.limit.as_deref())
        .unwrap_or(DEFAULT_LIMIT)
        .min(MAX_LIMIT);

    let sort_by = options
        .sort_by
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SORT_BY)
        .to_string();

    let sort_order = match options.sort_order.as_deref().map(|s| s.trim().to_lowercase()) {
        Some(order) if order == "asc" => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    Pagination {
        page,
        limit,
        skip: u64::from(page - 1) * u64::from(limit),
        sort_by,
        sort_order,
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).filter(|v| *v > 0)
}
