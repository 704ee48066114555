use crate::error::CoreError;
use crate::facility::FacilityPayload;
use chrono::NaiveDate;
use serde::Deserialize;

/// Page size used when a list request does not specify one.
pub const DEFAULT_LIMIT: i64 = 100;
/// Hard ceiling on the page size. Larger requests are rejected, not truncated.
pub const MAX_LIMIT: i64 = 5000;

/// The raw list criteria as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacilityQuery {
    pub segment: Option<String>,
    pub technology: Option<String>,
    pub announced_before: Option<NaiveDate>,
    pub announced_after: Option<NaiveDate>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated list criteria. All present criteria combine with AND; results
/// are ordered by `announcement_date`, then `uid`.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityFilter {
    pub segment: Option<String>,
    pub technology: Option<String>,
    /// Exclusive upper bound on the announcement date.
    pub announced_before: Option<NaiveDate>,
    /// Exclusive lower bound on the announcement date.
    pub announced_after: Option<NaiveDate>,
    pub offset: i64,
    pub limit: i64,
}

impl Default for FacilityFilter {
    fn default() -> Self {
        Self {
            segment: None,
            technology: None,
            announced_before: None,
            announced_after: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<FacilityQuery> for FacilityFilter {
    type Error = CoreError;

    fn try_from(query: FacilityQuery) -> Result<Self, Self::Error> {
        let offset = query.offset.unwrap_or(0);
        if offset < 0 {
            return Err(CoreError::invalid("offset", "must not be negative"));
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 1 {
            return Err(CoreError::invalid("limit", "must be at least 1"));
        }
        if limit > MAX_LIMIT {
            return Err(CoreError::LimitExceeded { requested: limit, max: MAX_LIMIT });
        }

        Ok(Self {
            segment: query.segment,
            technology: query.technology,
            announced_before: query.announced_before,
            announced_after: query.announced_after,
            offset,
            limit,
        })
    }
}

impl FacilityFilter {
    /// Evaluates the filter's criteria against a single record. Pagination is
    /// not part of this predicate.
    pub fn matches(&self, facility: &FacilityPayload) -> bool {
        if let Some(segment) = &self.segment {
            if facility.segment != *segment {
                return false;
            }
        }
        if let Some(technology) = &self.technology {
            if facility.technology != *technology {
                return false;
            }
        }
        if let Some(before) = self.announced_before {
            if facility.announcement_date >= before {
                return false;
            }
        }
        if let Some(after) = self.announced_after {
            if facility.announcement_date <= after {
                return false;
            }
        }
        true
    }
}
