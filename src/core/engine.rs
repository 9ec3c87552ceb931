//! List query engine
//!
//! Applies filters, then sorters, then pagination to a snapshot of a record
//! collection. The order is fixed: `total` is counted after filtering and
//! before pagination. Inputs are never mutated; the engine clones the
//! surviving records before sorting them.

use crate::core::compare::natural_cmp;
use crate::core::field::{FieldValue, coerce_json_to_string};
use crate::core::query::{Filter, FilterOperator, ListResponse, Pagination, SortOrder, Sorter};
use crate::core::record::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// Run a list query over `records`.
///
/// With no `pagination` the whole filtered set is returned as one page.
pub fn query<R: Record>(
    records: &[R],
    filters: &[Filter],
    sorters: &[Sorter],
    pagination: Option<&Pagination>,
) -> ListResponse<R> {
    let mut rows = apply_filters(records, filters);
    apply_sorters(&mut rows, sorters);

    let total = rows.len();
    let data = paginate(rows, pagination);

    tracing::debug!(
        resource = R::resource_name(),
        filters = filters.len(),
        sorters = sorters.len(),
        total,
        returned = data.len(),
        "list query executed"
    );

    ListResponse { data, total }
}

/// Keep the records that satisfy every filter
pub fn apply_filters<R: Record>(records: &[R], filters: &[Filter]) -> Vec<R> {
    let active: Vec<&Filter> = filters.iter().filter(|f| is_applicable::<R>(f)).collect();

    records
        .iter()
        .filter(|record| active.iter().all(|filter| matches(*record, filter)))
        .cloned()
        .collect()
}

/// Stable composite sort; a no-op when `sorters` is empty
pub fn apply_sorters<R: Record>(rows: &mut [R], sorters: &[Sorter]) {
    if sorters.is_empty() {
        return;
    }

    rows.sort_by(|a, b| compare_records(a, b, sorters));
}

/// Slice one page out of already filtered and sorted rows
pub fn paginate<R>(rows: Vec<R>, pagination: Option<&Pagination>) -> Vec<R> {
    let Some(page) = pagination else {
        return rows;
    };

    rows.into_iter()
        .skip(page.start())
        .take(page.end() - page.start())
        .collect()
}

/// Compare two records key by key, falling through on ties.
///
/// Missing or null values order after present ones in both directions.
pub fn compare_records<R: Record>(a: &R, b: &R, sorters: &[Sorter]) -> Ordering {
    for sorter in sorters {
        let a_value = present(a.field_value(&sorter.field));
        let b_value = present(b.field_value(&sorter.field));

        let ordering = match (a_value, b_value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(a_value), Some(b_value)) => natural_cmp(
                &a_value.to_coerced_string(),
                &b_value.to_coerced_string(),
            ),
        };

        match (ordering, sorter.order) {
            (Ordering::Equal, _) => continue,
            (ordering, SortOrder::Asc) => return ordering,
            (ordering, SortOrder::Desc) => return ordering.reverse(),
        }
    }

    Ordering::Equal
}

/// Keep the well-formed filter entries from a raw, caller-supplied list.
///
/// An entry must be an object carrying `field` (string), `operator` (string)
/// and `value` (any JSON). Anything else is dropped without error.
pub fn parse_filters(raw: &[Value]) -> Vec<Filter> {
    raw.iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let field = obj.get("field")?.as_str()?;
            obj.get("operator")?.as_str()?;
            obj.contains_key("value").then_some(())?;
            serde_json::from_value::<Filter>(Value::Object(obj.clone()))
                .ok()
                .filter(|_| !field.is_empty())
        })
        .collect()
}

/// Keep the well-formed sorter entries from a raw, caller-supplied list.
///
/// An entry must be an object carrying `field` (string) and an `order` of
/// exactly `"asc"` or `"desc"`.
pub fn parse_sorters(raw: &[Value]) -> Vec<Sorter> {
    raw.iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let field = obj.get("field")?.as_str()?;
            let order = SortOrder::parse(obj.get("order")?.as_str()?)?;
            Some(Sorter {
                field: field.to_string(),
                order,
            })
        })
        .collect()
}

fn is_applicable<R: Record>(filter: &Filter) -> bool {
    filter.operator != FilterOperator::Unsupported && R::has_field(&filter.field)
}

fn matches<R: Record>(record: &R, filter: &Filter) -> bool {
    let Some(value) = present(record.field_value(&filter.field)) else {
        return false;
    };

    let actual = value.to_coerced_string();
    let expected = coerce_json_to_string(&filter.value);

    match filter.operator {
        FilterOperator::Eq => actual == expected,
        FilterOperator::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        FilterOperator::Unsupported => true,
    }
}

fn present(value: Option<FieldValue>) -> Option<FieldValue> {
    value.filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Serialize)]
    struct Course {
        id: i64,
        title: String,
        level: Option<i64>,
    }

    impl Record for Course {
        fn resource_name() -> &'static str {
            "courses"
        }

        fn fields() -> &'static [&'static str] {
            &["id", "title", "level"]
        }

        fn id(&self) -> i64 {
            self.id
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(FieldValue::Integer(self.id)),
                "title" => Some(FieldValue::String(self.title.clone())),
                "level" => Some(self.level.into()),
                _ => None,
            }
        }
    }

    fn course(id: i64, title: &str, level: Option<i64>) -> Course {
        Course {
            id,
            title: title.to_string(),
            level,
        }
    }

    fn catalog() -> Vec<Course> {
        vec![
            course(1, "Algebra 10", Some(2)),
            course(2, "algebra 9", None),
            course(3, "Biology", Some(1)),
            course(4, "Chemistry", Some(2)),
        ]
    }

    fn ids(rows: &[Course]) -> Vec<i64> {
        rows.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_no_filters_no_sorters_keeps_order() {
        let result = query(&catalog(), &[], &[], None);
        assert_eq!(ids(&result.data), vec![1, 2, 3, 4]);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_eq_compares_coerced_strings() {
        let result = query(&catalog(), &[Filter::eq("level", "2")], &[], None);
        assert_eq!(ids(&result.data), vec![1, 4]);

        let result = query(&catalog(), &[Filter::eq("level", 2)], &[], None);
        assert_eq!(ids(&result.data), vec![1, 4]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let result = query(&catalog(), &[Filter::contains("title", "ALGEBRA")], &[], None);
        assert_eq!(ids(&result.data), vec![1, 2]);
    }

    #[test]
    fn test_filters_compose_as_and() {
        let filters = [Filter::contains("title", "algebra"), Filter::eq("level", 2)];
        let result = query(&catalog(), &filters, &[], None);
        assert_eq!(ids(&result.data), vec![1]);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_unknown_field_and_operator_are_ignored() {
        let filters = [
            Filter::eq("room", "B12"),
            Filter::new("title", FilterOperator::Unsupported, "zzz"),
        ];
        let result = query(&catalog(), &filters, &[], None);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_null_value_never_matches() {
        let result = query(&catalog(), &[Filter::eq("level", "null")], &[], None);
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_sort_is_numeric_aware() {
        let result = query(&catalog(), &[], &[Sorter::asc("title")], None);
        assert_eq!(ids(&result.data), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let asc = query(&catalog(), &[], &[Sorter::asc("level")], None);
        assert_eq!(ids(&asc.data), vec![3, 1, 4, 2]);

        let desc = query(&catalog(), &[], &[Sorter::desc("level")], None);
        assert_eq!(ids(&desc.data), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_composite_sort_falls_through_on_ties() {
        let sorters = [Sorter::desc("level"), Sorter::desc("title")];
        let result = query(&catalog(), &[], &sorters, None);
        assert_eq!(ids(&result.data), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            course(7, "Physics", Some(1)),
            course(3, "Art", Some(1)),
            course(5, "physics", Some(1)),
            course(1, "Physics", Some(1)),
        ];

        let asc = query(&records, &[], &[Sorter::asc("title"), Sorter::asc("level")], None);
        assert_eq!(ids(&asc.data), vec![3, 7, 5, 1]);

        let desc = query(&records, &[], &[Sorter::desc("title")], None);
        assert_eq!(ids(&desc.data), vec![7, 5, 1, 3]);
    }

    #[test]
    fn test_sorting_does_not_mutate_input() {
        let records = catalog();
        let before = records.clone();
        let _ = query(&records, &[], &[Sorter::desc("id")], None);
        assert_eq!(records, before);
    }

    #[test]
    fn test_pagination_slices_after_total() {
        let page = Pagination::new(2, 3);
        let result = query(&catalog(), &[], &[], Some(&page));
        assert_eq!(ids(&result.data), vec![4]);
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = Pagination::new(5, 2);
        let result = query(&catalog(), &[], &[], Some(&page));
        assert!(result.data.is_empty());
        assert_eq!(result.total, 4);
    }

    #[test]
    fn test_parse_filters_drops_malformed_entries() {
        let raw = vec![
            json!({"field": "title", "operator": "contains", "value": "bio"}),
            json!({"field": "title", "operator": "eq"}),
            json!({"operator": "eq", "value": 1}),
            json!("title=bio"),
            json!(null),
            json!({"field": "level", "operator": "eq", "value": null}),
        ];
        let filters = parse_filters(&raw);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0], Filter::contains("title", "bio"));
        assert_eq!(filters[1].value, Value::Null);
    }

    #[test]
    fn test_parse_sorters_requires_valid_order() {
        let raw = vec![
            json!({"field": "title", "order": "asc"}),
            json!({"field": "title", "order": "up"}),
            json!({"field": "level"}),
            json!({"field": "level", "order": "desc"}),
        ];
        assert_eq!(
            parse_sorters(&raw),
            vec![Sorter::asc("title"), Sorter::desc("level")]
        );
    }
}
