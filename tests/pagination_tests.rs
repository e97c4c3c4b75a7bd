use songvault::pagination::{DEFAULT_LIMIT, Page, PageQuery, clamp_limit, total_pages};

#[test]
fn test_allowed_limits_pass_through() {
    assert_eq!(clamp_limit(Some(5)), 5);
    assert_eq!(clamp_limit(Some(10)), 10);
    assert_eq!(clamp_limit(Some(30)), 30);
}

#[test]
fn test_unknown_limits_fall_back_to_default() {
    assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(0)), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(-5)), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(7)), DEFAULT_LIMIT);
    assert_eq!(clamp_limit(Some(100)), DEFAULT_LIMIT);
}

#[test]
fn test_offset_is_one_indexed() {
    let query = PageQuery {
        page: Some(3),
        limit: Some(10),
    };
    assert_eq!(query.offset(), 20);

    // Absent page defaults to the first.
    let query = PageQuery {
        page: None,
        limit: Some(5),
    };
    assert_eq!(query.page(), 1);
    assert_eq!(query.offset(), 0);
}

#[test]
fn test_total_pages_is_ceiling_division() {
    assert_eq!(total_pages(0, 5), 0);
    assert_eq!(total_pages(1, 5), 1);
    assert_eq!(total_pages(5, 5), 1);
    assert_eq!(total_pages(6, 5), 2);
    assert_eq!(total_pages(29, 10), 3);
    assert_eq!(total_pages(30, 10), 3);
    assert_eq!(total_pages(31, 30), 2);
}

#[test]
fn test_page_envelope_echoes_clamped_values() {
    let query = PageQuery {
        page: Some(2),
        limit: Some(7), // not allowed, coerced to 5
    };
    let page = Page::new(vec![1, 2, 3], 8, &query);

    assert_eq!(page.limit, 5);
    assert_eq!(page.page, 2);
    assert_eq!(page.total, 8);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data, vec![1, 2, 3]);
}
