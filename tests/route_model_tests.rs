use std::sync::Arc;

use navroute::routing::{
    AsyncData, DataSegment, DataValue, NameSegment, NavigationData, NavigationDataMap, Route,
    RouteError, SegmentInstance,
};
use tokio_test::{assert_pending, task};

// ============================================================================
// Helper Functions
// ============================================================================

struct Segments {
    home: Arc<NameSegment>,
    items: Arc<NameSegment>,
    item: Arc<DataSegment>,
    details: Arc<NameSegment>,
}

/// home → items → {item} → details
fn segments() -> Segments {
    let home = Arc::new(NameSegment::new("home"));
    let items = Arc::new(NameSegment::new("items"));
    let item = Arc::new(DataSegment::new("item", items.clone()));
    let details = Arc::new(NameSegment::under("details", item.clone()));
    Segments {
        home,
        items,
        item,
        details,
    }
}

fn labels(segments: &[SegmentInstance]) -> Vec<&str> {
    segments.iter().map(SegmentInstance::label).collect()
}

/// Route with a bag holding `value` under the `item` key, the way navigation
/// orchestration keeps them in sync.
fn with_item(route: Route, s: &Segments, primitive: &str, value: AsyncData) -> Route {
    let routed = route.add_data(s.item.clone(), primitive, Some(value.clone()));
    let bag = match routed.data() {
        Some(bag) => bag.insert("item", value),
        None => NavigationDataMap::with_entries([("item", value)]).into_shared(),
    };
    routed.with_data(Some(bag))
}

// ============================================================================
// Edits
// ============================================================================

#[test]
fn test_add_name_appends_and_keeps_data() {
    let s = segments();
    let bag = NavigationDataMap::new().into_shared();
    let route = Route::empty().add_name(s.home.clone()).with_data(Some(bag.clone()));

    let next = route.add_name(s.items.clone());
    assert_eq!(next.len(), route.len() + 1);
    assert_eq!(&next.segments()[..route.len()], route.segments());
    assert_eq!(next.last(), Some(&SegmentInstance::name(s.items.clone())));
    assert!(Arc::ptr_eq(next.data().unwrap(), &bag));
}

#[test]
fn test_add_data_appends_anchor_pair() {
    let s = segments();
    let value = AsyncData::ready(42u32);
    let route = Route::empty().add_name(s.home.clone());

    let next = route.add_data(s.item.clone(), "42", Some(value.clone()));
    assert_eq!(
        &next.segments()[route.len()..],
        &[
            SegmentInstance::name(s.items.clone()),
            SegmentInstance::data(s.item.clone(), "42", Some(value)),
        ]
    );
    // The bag is left to the caller
    assert!(next.data().is_none());
}

#[test]
fn test_go_back_on_empty_route_is_noop() {
    let empty = Route::empty();
    assert_eq!(empty.go_back().unwrap(), empty);
}

#[test]
fn test_go_back_undoes_name_append() {
    let s = segments();
    let route = Route::empty().add_name(s.home.clone());
    let back = route.add_name(s.items.clone()).go_back().unwrap();
    assert_eq!(back.segments(), route.segments());
}

#[test]
fn test_go_back_undoes_pair_append_and_prunes_bag() {
    let s = segments();
    let route = Route::empty().add_name(s.home.clone());
    let forward = with_item(route.clone(), &s, "7", AsyncData::ready(7u32));
    assert!(forward.data().unwrap().get("item").is_some());

    let back = forward.go_back().unwrap();
    assert_eq!(back.segments(), route.segments());
    assert!(back.data().unwrap().get("item").is_none());
}

#[test]
fn test_go_back_on_dialog_fails() {
    let s = segments();
    let route = Route::new(
        vec![SegmentInstance::name(s.home.clone()), SegmentInstance::dialog()],
        None,
        false,
    );
    assert!(matches!(
        route.go_back(),
        Err(RouteError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_remove_zero_is_identity() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "1",
        AsyncData::ready(1u32),
    );
    assert_eq!(route.remove(0).unwrap(), route);
}

#[test]
fn test_remove_truncates_and_checks_range() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "1",
        AsyncData::ready(1u32),
    )
    .add_name(s.details.clone());

    for k in 0..=route.len() {
        assert_eq!(route.remove(k).unwrap().len(), route.len() - k);
    }
    assert_eq!(
        route.remove(route.len() + 1),
        Err(RouteError::OutOfRange {
            count: route.len() + 1,
            len: route.len(),
        })
    );
}

#[test]
fn test_remove_across_pairs_prunes_every_key() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "1",
        AsyncData::ready(1u32),
    )
    .add_name(s.details.clone());

    // drops details, {item}, items
    let removed = route.remove(3).unwrap();
    assert_eq!(labels(removed.segments()), ["home"]);
    assert!(removed.data().unwrap().is_empty());
}

#[test]
fn test_edits_leave_receiver_untouched() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "1",
        AsyncData::ready(1u32),
    );
    let snapshot = route.clone();

    let _ = route.go_back().unwrap();
    let _ = route.remove(2).unwrap();
    let _ = route.add_name(s.details.clone());
    assert_eq!(route, snapshot);
    assert!(route.data().unwrap().get("item").is_some());
}

#[test]
fn test_refresh_is_forwarded() {
    let s = segments();
    let route = Route::empty().add_name(s.home.clone()).with_refresh(true);
    assert!(route.add_name(s.items.clone()).refresh());
    assert!(route.go_back().unwrap().refresh());
}

// ============================================================================
// Navigatable segments
// ============================================================================

#[test]
fn test_navigatable_segments_collapse_anchors() {
    let s = segments();
    let route = Route::empty()
        .add_name(Arc::new(NameSegment::new("A")))
        .add_data(s.item.clone(), "X", None);

    // [A, items, X] → [A, X]
    assert_eq!(labels(&route.navigatable_segments()), ["A", "X"]);
}

#[test]
fn test_navigatable_segments_short_routes_unchanged() {
    let s = segments();
    assert!(Route::empty().navigatable_segments().is_empty());

    let single = Route::empty().add_name(s.home.clone());
    assert_eq!(single.navigatable_segments(), single.segments());
}

#[test]
fn test_navigatable_segments_force_include_last() {
    let s = segments();
    let route = Route::new(
        vec![
            SegmentInstance::name(s.home.clone()),
            SegmentInstance::name(s.items.clone()),
        ],
        None,
        false,
    );
    assert_eq!(labels(&route.navigatable_segments()), ["home", "items"]);
}

#[test]
fn test_breadcrumb_truncation() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "42",
        AsyncData::ready(42u32),
    )
    .add_name(s.details.clone());
    assert_eq!(labels(&route.navigatable_segments()), ["home", "42", "details"]);

    let to_item = route.truncate_to_navigatable(1).unwrap();
    assert_eq!(labels(to_item.segments()), ["home", "items", "42"]);
    assert!(to_item.data().unwrap().get("item").is_some());

    let to_home = route.truncate_to_navigatable(0).unwrap();
    assert_eq!(labels(to_home.segments()), ["home"]);
    assert!(to_home.data().unwrap().get("item").is_none());

    assert_eq!(
        route.truncate_to_navigatable(3),
        Err(RouteError::NavigatableIndexOutOfRange { index: 3, len: 3 })
    );
}

// ============================================================================
// Construction checks
// ============================================================================

#[test]
fn test_try_from_segments_rejects_unanchored_data() {
    let s = segments();
    let leading = vec![SegmentInstance::data(s.item.clone(), "1", None)];
    assert_eq!(
        Route::try_from_segments(leading, None, false),
        Err(RouteError::MisplacedDataSegment { index: 0 })
    );

    let wrong_anchor = vec![
        SegmentInstance::name(s.home.clone()),
        SegmentInstance::data(s.item.clone(), "1", None),
    ];
    assert_eq!(
        Route::try_from_segments(wrong_anchor, None, false),
        Err(RouteError::MisplacedDataSegment { index: 1 })
    );

    let built = Route::empty().add_data(s.item.clone(), "1", None);
    assert!(Route::try_from_segments(built.segments().to_vec(), None, false).is_ok());
}

#[test]
fn test_dialog_instance_has_no_definition() {
    assert!(matches!(
        SegmentInstance::dialog().segment(),
        Err(RouteError::NotImplemented(_))
    ));
}

// ============================================================================
// Async values
// ============================================================================

#[test]
fn test_pending_value_is_stored_not_driven() {
    let s = segments();
    let pending = AsyncData::new(futures::future::pending::<DataValue>());
    let route = with_item(Route::empty().add_name(s.home.clone()), &s, "9", pending.clone());

    // Edits and projections never poll the value
    let _ = route.navigatable_segments();
    let back = route.go_back().unwrap();
    assert!(back.data().unwrap().get("item").is_none());
    assert!(pending.peek().is_none());

    let mut resolving = task::spawn(pending.resolve());
    assert_pending!(resolving.poll());
}

#[tokio::test]
async fn test_value_resolves_through_route() {
    let s = segments();
    let route = with_item(
        Route::empty().add_name(s.home.clone()),
        &s,
        "42",
        AsyncData::ready("record 42".to_string()),
    );

    let stored = route.data().unwrap().get("item").unwrap();
    let value = stored.resolve().await;
    assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("record 42"));

    let Some(SegmentInstance::Data(leaf)) = route.last() else {
        panic!("expected a data leaf");
    };
    assert!(leaf.value.as_ref().unwrap().peek().is_some());
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_home_items_item_scenario() {
    let s = segments();
    let route = Route::empty()
        .add_name(s.home.clone())
        .add_name(s.items.clone());
    let route = with_item(route, &s, "42", AsyncData::ready(42u32));

    // add_data re-inserts the `items` anchor after the explicit `items`
    assert_eq!(labels(route.segments()), ["home", "items", "items", "42"]);
    assert_eq!(labels(&route.navigatable_segments()), ["home", "items", "42"]);

    let back = route.go_back().unwrap();
    assert_eq!(labels(back.segments()), ["home", "items"]);
    assert!(back.data().unwrap().get("item").is_none());
}
