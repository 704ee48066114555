use core_types::FacilityFilter;
use sqlx::{Postgres, QueryBuilder};

/// Column list shared by every statement that returns facility rows.
pub(crate) const FACILITY_COLUMNS: &str = "uid, segment, company, technology, subcategory, \
     investment_status, latitude, longitude, estimated_investment, announcement_date";

/// Composes the single paginated read behind the list operation.
///
/// Every criterion present in the filter becomes one `AND`-ed predicate with a
/// bound parameter. Rows sharing an announcement date are ordered by uid so
/// that page boundaries are deterministic.
pub fn build_list_query(filter: &FacilityFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {FACILITY_COLUMNS} FROM facility"));
    let mut keyword = " WHERE ";

    if let Some(segment) = &filter.segment {
        builder.push(keyword).push("segment = ").push_bind(segment.clone());
        keyword = " AND ";
    }
    if let Some(technology) = &filter.technology {
        builder.push(keyword).push("technology = ").push_bind(technology.clone());
        keyword = " AND ";
    }
    if let Some(before) = filter.announced_before {
        builder.push(keyword).push("announcement_date < ").push_bind(before);
        keyword = " AND ";
    }
    if let Some(after) = filter.announced_after {
        builder.push(keyword).push("announcement_date > ").push_bind(after);
    }

    builder.push(" ORDER BY announcement_date ASC, uid ASC");
    builder.push(" LIMIT ").push_bind(filter.limit);
    builder.push(" OFFSET ").push_bind(filter.offset);

    builder
}
