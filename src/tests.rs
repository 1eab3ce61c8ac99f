use crate::*;

use alloc::collections::BTreeSet;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::Mutex;

use proptest::prelude::*;

const ITEM_HEIGHT: u32 = 40;
const H: f64 = ITEM_HEIGHT as f64;
const WIDTH: f64 = 120.0;

type Selector = LoopingSelector<u32, MemoryScrollHost>;

fn numbers(n: u32) -> Vec<u32> {
    (0..n).collect()
}

fn build(items: Vec<u32>, viewport: f64, options: SelectorOptions<u32>) -> Selector {
    let mut s = LoopingSelector::new(options);
    assert!(s.apply_template(MemoryScrollHost::new(viewport)).is_none());
    s.set_items(items).unwrap();
    s.arrange(WIDTH, viewport).unwrap();
    s
}

fn minute_wheel() -> Selector {
    build(numbers(60), 200.0, SelectorOptions::new(ITEM_HEIGHT))
}

fn offset(s: &Selector) -> f64 {
    s.host().unwrap().vertical_offset()
}

fn user_scroll_to(s: &mut Selector, to: f64) {
    s.host_mut().unwrap().user_scroll_to(to);
    s.process_host_events().unwrap();
}

fn user_scroll_by(s: &mut Selector, delta: f64) {
    let to = offset(s) + delta;
    user_scroll_to(s, to);
}

fn finish_animation(s: &mut Selector) {
    assert!(s.host_mut().unwrap().finish_animation());
    s.process_host_events().unwrap();
}

fn selection_changes(events: &[SelectorEvent<u32>]) -> Vec<(usize, usize)> {
    events
        .iter()
        .filter_map(|e| match e {
            SelectorEvent::SelectionChanged(c) => Some((c.old_index, c.new_index)),
            _ => None,
        })
        .collect()
}

fn logical_at_viewport_centre(s: &Selector) -> Option<usize> {
    let state = s.state();
    let centre = state.viewport.midpoint();
    s.realized_items().find_map(|id| {
        let item = s.item(id)?;
        (item.top() <= centre && centre < item.top() + item.height()).then_some(item.content()?)
    })
}

/// Window is contiguous, positioned slot by slot, and bound to the right logical items.
fn assert_window_consistent(s: &Selector) {
    let Some((top, bottom)) = s.realized_range() else {
        assert_eq!(s.realized_len(), 0);
        return;
    };
    let n = s.item_count();
    let state = s.state();
    assert_eq!(s.realized_len() as i64, bottom - top + 1);
    let mut seen = BTreeSet::new();
    for (k, id) in s.realized_items().enumerate() {
        assert!(seen.insert(id), "item {id:?} realized twice");
        assert!(!s.pool().is_recycled(id));
        let item = s.item(id).unwrap();
        let visual = top + k as i64;
        assert_eq!(item.visual_index(), visual);
        assert_eq!(item.content(), Some(positive_mod(visual, n)));
        assert_eq!(item.top(), state.realized.top + k as f64 * H);
        assert_eq!(item.left(), 0.0);
        assert_eq!(item.size_of_set(), n);
    }
    assert_eq!(state.realized.bottom, state.realized.top + s.realized_len() as f64 * H);
}

#[test]
fn minute_wheel_setup_centres_the_selection() {
    let mut s = minute_wheel();
    assert!(s.is_set_up());
    let host = s.host().unwrap();
    // 200 + 1001 * 40
    assert_eq!(host.extent_height(), 40_240.0);
    assert_eq!(s.panel().unwrap().height(), 40_240.0);
    assert_eq!(offset(&s), 20_040.0);

    assert_eq!(s.realized_range(), Some((-5, 5)));
    assert_eq!(s.midpoint_index(), 0);
    assert_eq!(s.selected_index(), 0);
    assert_eq!(logical_at_viewport_centre(&s), Some(0));
    assert_window_consistent(&s);

    let selected: Vec<_> = s
        .realized_items()
        .filter(|&id| s.item(id).unwrap().state() == ItemVisualState::Selected)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(s.item(selected[0]).unwrap().content(), Some(0));

    let events = s.take_events();
    assert!(selection_changes(&events).is_empty());
    assert!(events.contains(&SelectorEvent::SnapPointsChanged));
    assert!(events.contains(&SelectorEvent::AutomationStructureChanged));
    assert!(events.contains(&SelectorEvent::PeerMapInvalidated));
    assert_eq!(s.host().unwrap().pending_events(), 0);

    let snap = s
        .panel()
        .unwrap()
        .snap_points(Orientation::Vertical, SnapPointsAlignment::Near);
    assert_eq!(snap.spacing, H);
}

#[test]
fn scrolling_down_ten_items_trims_head_and_adds_tail() {
    let mut s = minute_wheel();
    s.take_events();
    let before: Vec<_> = s.realized_items().collect();

    user_scroll_by(&mut s, 400.0);

    assert_eq!(s.realized_range(), Some((5, 15)));
    assert_eq!(s.selected_index(), 10);
    assert_eq!(logical_at_viewport_centre(&s), Some(10));
    let logicals: Vec<_> = s
        .realized_items()
        .map(|id| s.item(id).unwrap().content().unwrap())
        .collect();
    assert_eq!(logicals, (5..=15).collect::<Vec<usize>>());
    assert_window_consistent(&s);

    // The settled pass recentred the panel.
    assert_eq!(offset(&s), 20_040.0);
    assert!(s.last_balance_stats().normalized);

    // Ten items were recycled and handed back out; nothing new was allocated.
    assert_eq!(s.pool_stats().total_created, 11);
    assert!(s.pool_stats().reuse_count >= 10);
    assert!(s.realized_items().any(|id| before.contains(&id)));

    let events = s.take_events();
    assert_eq!(selection_changes(&events), vec![(0, 10)]);
    assert_eq!(s.items_state(), ItemsState::Expanded);
}

#[test]
fn scrolling_up_one_item_wraps_to_the_last_logical_item() {
    let mut s = build(numbers(12), 200.0, SelectorOptions::new(ITEM_HEIGHT));
    s.take_events();

    user_scroll_by(&mut s, -H);

    assert_eq!(s.midpoint_index(), -1);
    assert_eq!(s.selected_index(), positive_mod(-1, 12));
    assert_eq!(s.selected_index(), 11);
    assert_eq!(s.selected_item(), Some(&11));
    assert_window_consistent(&s);
    assert_eq!(selection_changes(&s.take_events()), vec![(0, 11)]);
}

#[test]
fn non_looping_window_stops_at_the_last_item() {
    let options = SelectorOptions::new(ITEM_HEIGHT).with_should_loop(false);
    let mut s = build(numbers(7), 200.0, options);
    // 200 + 6 * 40 + 1
    assert_eq!(s.host().unwrap().extent_height(), 441.0);
    assert_eq!(s.realized_range(), Some((0, 5)));
    assert_eq!(s.selected_index(), 0);

    for _ in 0..5 {
        user_scroll_by(&mut s, 3.0 * H);
        let (top, bottom) = s.realized_range().unwrap();
        assert!(top >= 0 && bottom <= 6);
        assert_window_consistent(&s);
    }
    assert_eq!(s.realized_range().unwrap().1, 6);
    assert_eq!(s.selected_index(), 6);

    // A further balance has nothing to add past the boundary.
    s.balance(true).unwrap();
    assert_eq!(s.last_balance_stats().tail_add, 0);
    assert_eq!(s.realized_range().unwrap().1, 6);

    for _ in 0..5 {
        user_scroll_by(&mut s, -3.0 * H);
        let (top, bottom) = s.realized_range().unwrap();
        assert!(top >= 0 && bottom <= 6);
    }
    assert_eq!(s.selected_index(), 0);
}

#[test]
fn inspection_realization_leaves_the_window_alone() {
    let options = SelectorOptions::new(ITEM_HEIGHT)
        .with_should_loop(false)
        .with_selected_index(23);
    let mut s = build(numbers(60), 120.0, options);
    assert_eq!(s.realized_range(), Some((20, 26)));
    assert_eq!(s.selected_index(), 23);

    let id = s.realize_for_inspection(50).unwrap();
    assert_eq!(s.realized_range(), Some((20, 26)));
    assert!(!s.realized_items().any(|r| r == id));

    let item = s.item(id).unwrap();
    assert_eq!(item.content(), Some(50));
    assert_eq!(item.position_in_set(), 51);
    assert_eq!(item.size_of_set(), 60);
    assert_eq!(item.left(), RECYCLED_LEFT);
    assert_eq!(s.item_content(id), Some(&50));

    // Asking again returns the same item.
    assert_eq!(s.realize_for_inspection(50).unwrap(), id);
    assert_eq!(s.automation_container_for_logical(50), Some(id));
    // Items already in the window are returned as they are.
    let in_window = s.realize_for_inspection(22).unwrap();
    assert!(s.realized_items().any(|r| r == in_window));

    assert!(matches!(
        s.realize_for_inspection(60),
        Err(SelectorError::InvalidIndex { index: 60, count: 60 })
    ));
}

#[test]
fn inspection_item_joins_the_window_when_scrolled_to() {
    let mut s = minute_wheel();
    let id = s.realize_for_inspection(8).unwrap();
    assert_eq!(s.inspection_items().collect::<Vec<_>>(), vec![(8, id)]);

    user_scroll_by(&mut s, 3.0 * H);

    assert_eq!(s.automation_container_for_logical(8), Some(id));
    assert!(s.realized_items().any(|r| r == id));
    assert_eq!(s.inspection_items().count(), 0);
    assert_window_consistent(&s);
}

#[test]
fn balance_is_idempotent() {
    let mut s = minute_wheel();
    user_scroll_by(&mut s, 7.0 * H);
    let range = s.realized_range();

    s.balance(true).unwrap();
    assert_eq!(s.last_balance_stats(), BalanceStats::default());
    s.balance(false).unwrap();
    assert_eq!(s.last_balance_stats(), BalanceStats::default());
    assert_eq!(s.realized_range(), range);
}

#[test]
fn normalize_keeps_the_centred_item() {
    let mut s = minute_wheel();
    let host = s.host_mut().unwrap();
    host.user_drag_to(20_040.0 + 400.0);
    s.process_host_events().unwrap();
    assert_eq!(s.items_state(), ItemsState::ManipulationInProgress);
    assert_eq!(offset(&s), 20_440.0);
    assert_eq!(s.selected_index(), 10);

    s.host_mut().unwrap().end_manipulation();
    s.process_host_events().unwrap();

    assert!(s.last_balance_stats().normalized);
    assert_eq!(offset(&s), 20_040.0);
    assert_eq!(s.selected_index(), 10);
    assert_eq!(logical_at_viewport_centre(&s), Some(10));
    assert_eq!(s.items_state(), ItemsState::Expanded);
    assert_window_consistent(&s);
}

#[test]
fn normalize_does_not_swallow_the_next_gesture_frame() {
    let mut s = minute_wheel();
    user_scroll_by(&mut s, 400.0);
    assert!(s.last_balance_stats().normalized);
    s.take_events();

    // Only the `Changing` frame balances during a drag.
    s.host_mut().unwrap().user_drag_to(20_040.0 + H);
    s.process_host_events().unwrap();

    assert_eq!(s.selected_index(), 11);
    assert_eq!(selection_changes(&s.take_events()), vec![(10, 11)]);
}

#[test]
fn off_snap_point_offsets_are_not_normalized() {
    let mut s = minute_wheel();
    user_scroll_by(&mut s, 410.0);
    assert!(!s.last_balance_stats().normalized);
    assert_eq!(offset(&s), 20_450.0);
    assert_window_consistent(&s);
}

#[test]
fn programmatic_scrolls_flush_host_events_synchronously() {
    let mut s = minute_wheel();
    s.take_events();
    s.set_selected_index(30).unwrap();

    assert_eq!(s.host().unwrap().pending_events(), 0);
    assert_eq!(offset(&s), 20_040.0 + 30.0 * H);
    assert_eq!(s.selected_index(), 30);
    assert_eq!(logical_at_viewport_centre(&s), Some(30));
    assert_window_consistent(&s);
    // The caller asked for it; no change notification.
    assert!(selection_changes(&s.take_events()).is_empty());

    assert_eq!(
        s.set_selected_index(60),
        Err(SelectorError::InvalidIndex { index: 60, count: 60 })
    );
    assert_eq!(s.selected_index(), 30);
}

#[test]
fn selection_callback_sees_every_change() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = SelectorOptions::new(ITEM_HEIGHT).with_on_selection_changed(Some(
        move |change: &SelectionChanged<u32>| {
            sink.lock()
                .unwrap()
                .push((change.old_item, change.new_item));
        },
    ));
    let mut s = build(numbers(60), 200.0, options);
    user_scroll_by(&mut s, 2.0 * H);
    user_scroll_by(&mut s, -3.0 * H);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(Some(0), Some(2)), (Some(2), Some(59))]
    );
}

#[test]
fn down_key_animates_one_item() {
    let mut s = minute_wheel();
    s.take_events();
    assert!(s.on_key_down(Key::Down, Modifiers::default()).unwrap());
    assert_eq!(s.host().unwrap().pending_animation(), Some(20_080.0));
    assert!(
        s.take_events()
            .contains(&SelectorEvent::InteractionSound(ElementSoundKind::Focus))
    );

    finish_animation(&mut s);
    assert_eq!(s.selected_index(), 1);
    assert_eq!(s.items_state(), ItemsState::Expanded);
    assert_window_consistent(&s);

    let alt = Modifiers {
        menu: true,
        ..Modifiers::default()
    };
    assert!(!s.on_key_down(Key::Down, alt).unwrap());
    assert!(!s.on_key_down(Key::Other, Modifiers::default()).unwrap());
}

#[test]
fn up_key_is_blocked_at_the_first_item_without_looping() {
    let options = SelectorOptions::new(ITEM_HEIGHT).with_should_loop(false);
    let mut s = build(numbers(7), 200.0, options);
    assert!(!s.on_key_down(Key::Up, Modifiers::default()).unwrap());
    assert_eq!(s.host().unwrap().pending_animation(), None);
    assert!(s.on_down_button_clicked().unwrap());
}

#[test]
fn page_keys_move_half_a_viewport() {
    let mut s = minute_wheel();
    assert!(s.on_key_down(Key::PageDown, Modifiers::default()).unwrap());
    assert_eq!(s.host().unwrap().pending_animation(), Some(20_140.0));
    assert!(s.on_key_down(Key::GamepadLeftTrigger, Modifiers::default()).unwrap());
    assert_eq!(s.host().unwrap().pending_animation(), Some(19_940.0));
}

#[test]
fn home_and_end_take_the_short_way_round() {
    let mut s = minute_wheel();
    s.set_selected_index(10).unwrap();
    s.take_events();

    assert!(s.on_key_down(Key::End, Modifiers::default()).unwrap());
    assert_eq!(s.selected_index(), 59);
    assert_eq!(logical_at_viewport_centre(&s), Some(59));
    assert_eq!(selection_changes(&s.take_events()), vec![(10, 59)]);

    assert!(s.on_key_down(Key::Home, Modifiers::default()).unwrap());
    assert_eq!(s.selected_index(), 0);
    assert_eq!(s.midpoint_index().abs() % 60, 0);
    assert_window_consistent(&s);
}

#[test]
fn tapping_an_item_scrolls_it_to_the_centre() {
    let mut s = minute_wheel();
    let target = s
        .realized_items()
        .find(|&id| s.item(id).unwrap().visual_index() == 2)
        .unwrap();
    s.on_item_tapped(target).unwrap();
    assert_eq!(s.host().unwrap().pending_animation(), Some(20_120.0));
    finish_animation(&mut s);
    assert_eq!(s.selected_index(), 2);

    // Tapping the selected item does not scroll.
    let centre = s.automation_selected_item().unwrap();
    s.on_item_tapped(centre).unwrap();
    assert_eq!(s.host().unwrap().pending_animation(), None);
}

#[test]
fn manipulation_and_focus_drive_the_items_state() {
    let mut s = minute_wheel();
    s.take_events();
    s.host_mut().unwrap().user_drag_to(20_060.0);
    s.process_host_events().unwrap();

    assert_eq!(s.items_state(), ItemsState::ManipulationInProgress);
    assert!(
        s.realized_items()
            .all(|id| s.item(id).unwrap().state() == ItemVisualState::Expanded)
    );
    let events = s.take_events();
    assert!(events.contains(&SelectorEvent::FocusRequested));
    assert!(events.contains(&SelectorEvent::AutomationExpandCollapseChanged));

    s.on_got_focus();
    s.on_lost_focus(false);
    assert_eq!(s.items_state(), ItemsState::LostFocus);

    s.on_pointer_pressed();
    assert_eq!(s.items_state(), ItemsState::ManipulationInProgress);
    s.on_lost_focus(false);
    // Focus was already gone.
    assert_eq!(s.items_state(), ItemsState::ManipulationInProgress);

    s.host_mut().unwrap().end_manipulation();
    s.process_host_events().unwrap();
    assert_eq!(s.items_state(), ItemsState::Expanded);
    let centre = s.automation_selected_item().unwrap();
    assert_eq!(s.item(centre).unwrap().state(), ItemVisualState::Selected);
}

#[test]
fn focused_selector_does_not_request_focus() {
    let mut s = minute_wheel();
    s.on_got_focus();
    s.take_events();
    user_scroll_by(&mut s, H);
    assert!(!s.take_events().contains(&SelectorEvent::FocusRequested));
}

#[test]
fn pointer_hover_changes_the_control_state() {
    let mut s = minute_wheel();
    s.take_events();
    s.on_pointer_entered(PointerDeviceType::Touch);
    assert_eq!(s.control_visual_state(), ControlVisualState::Normal);
    s.on_pointer_entered(PointerDeviceType::Mouse);
    assert_eq!(s.control_visual_state(), ControlVisualState::PointerOver);
    s.on_pointer_exited();
    assert_eq!(
        s.take_events(),
        vec![
            SelectorEvent::ControlVisualState(ControlVisualState::PointerOver),
            SelectorEvent::ControlVisualState(ControlVisualState::Normal),
        ]
    );
}

#[test]
fn item_pointer_states_return_to_the_assigned_state() {
    let mut s = minute_wheel();
    let id = s
        .realized_items()
        .find(|&id| s.item(id).unwrap().visual_index() == 1)
        .unwrap();
    s.on_item_pointer_entered(id, PointerDeviceType::Mouse);
    assert_eq!(s.item(id).unwrap().state(), ItemVisualState::PointerOver);
    s.on_item_pointer_pressed(id);
    assert_eq!(s.item(id).unwrap().state(), ItemVisualState::Pressed);
    s.on_item_pointer_released(id);
    s.on_item_pointer_exited(id);
    assert_eq!(s.item(id).unwrap().state(), ItemVisualState::Expanded);
}

#[test]
fn replacing_items_rebuilds_the_window() {
    let mut s = minute_wheel();
    s.set_selected_index(40).unwrap();
    s.take_events();

    s.set_items(numbers(12)).unwrap();
    assert_eq!(s.selected_index(), 11);
    assert_eq!(logical_at_viewport_centre(&s), Some(11));
    assert_window_consistent(&s);
    let events = s.take_events();
    assert!(events.contains(&SelectorEvent::PeerMapInvalidated));
    assert!(events.contains(&SelectorEvent::AutomationSelectionChanged));
}

#[test]
fn empty_collection_releases_every_item() {
    let mut s = minute_wheel();
    s.realize_for_inspection(30).unwrap();
    s.set_items(Vec::new()).unwrap();

    assert_eq!(s.realized_range(), None);
    assert_eq!(s.selected_item(), None);
    let stats = s.pool_stats();
    assert_eq!(stats.items_in_use, 0);
    assert_eq!(stats.items_in_pool, stats.total_created);

    // Scrolling an empty selector does nothing.
    user_scroll_by(&mut s, H);
    assert_eq!(s.realized_range(), None);

    s.set_items(numbers(60)).unwrap();
    assert_window_consistent(&s);
    assert!(s.realized_len() > 0);
    assert_eq!(s.pool_stats().items_in_pool + s.realized_len(), s.pool_stats().total_created);
}

#[test]
fn toggling_looping_sets_up_again() {
    let mut s = minute_wheel();
    s.set_selected_index(3).unwrap();
    s.set_should_loop(false).unwrap();

    // 200 + 59 * 40 + 1
    assert_eq!(s.host().unwrap().extent_height(), 2_561.0);
    assert_eq!(s.selected_index(), 3);
    assert_eq!(logical_at_viewport_centre(&s), Some(3));
    assert!(s.realized_range().unwrap().0 >= 0);
    assert_window_consistent(&s);

    s.set_should_loop(true).unwrap();
    assert_eq!(s.host().unwrap().extent_height(), 40_240.0);
    assert_eq!(logical_at_viewport_centre(&s), Some(3));
}

#[test]
fn item_height_changes_rebuild_geometry() {
    let mut s = minute_wheel();
    s.set_item_height(50).unwrap();
    assert_eq!(s.host().unwrap().extent_height(), 200.0 + 1001.0 * 50.0);
    let id = s.automation_selected_item().unwrap();
    assert_eq!(s.item(id).unwrap().height(), 50.0);
    assert_eq!(s.selected_index(), 0);
}

#[test]
fn item_width_falls_back_to_the_arranged_width() {
    let s = minute_wheel();
    assert_eq!(s.measure(300.0), 300.0);
    assert_eq!(s.measure(f64::INFINITY), 0.0);
    let id = s.realized_items().next().unwrap();
    assert_eq!(s.item(id).unwrap().width(), WIDTH);

    let fixed = build(
        numbers(60),
        200.0,
        SelectorOptions::new(ITEM_HEIGHT).with_item_width(80),
    );
    assert_eq!(fixed.measure(300.0), 80.0);
    let id = fixed.realized_items().next().unwrap();
    assert_eq!(fixed.item(id).unwrap().width(), 80.0);
}

#[test]
fn resizing_the_viewport_keeps_the_selection_centred() {
    let mut s = minute_wheel();
    s.host_mut().unwrap().set_viewport_height(300.0);
    s.arrange(WIDTH, 300.0).unwrap();

    assert_eq!(s.host().unwrap().extent_height(), 40_340.0);
    assert_eq!(s.realized_range(), Some((-7, 7)));
    assert_eq!(s.selected_index(), 0);
    assert_eq!(logical_at_viewport_centre(&s), Some(0));
    assert_window_consistent(&s);
}

#[test]
fn resizing_the_viewport_moves_inspection_items_too() {
    let mut s = minute_wheel();
    let id = s.realize_for_inspection(30).unwrap();
    // -5 is the window top, at 19_920.
    assert_eq!(s.item(id).unwrap().top(), 19_920.0 + 35.0 * H);

    s.host_mut().unwrap().set_viewport_height(300.0);
    s.arrange(WIDTH, 300.0).unwrap();

    // The panel grew by 100 px; everything moved down by half of that.
    let item = s.item(id).unwrap();
    assert_eq!(item.top(), 19_920.0 + 35.0 * H + 50.0);
    assert_eq!(item.left(), RECYCLED_LEFT);
    assert_eq!(s.automation_container_for_logical(30), Some(id));
    let state = s.state();
    assert_eq!(item.top(), state.realized.top + (30 - state.realized_top_idx) as f64 * H);
}

#[test]
fn refused_scroll_writes_are_replayed_on_arrange() {
    let mut s = LoopingSelector::new(SelectorOptions::new(ITEM_HEIGHT));
    let mut host = MemoryScrollHost::new(200.0);
    host.set_attached(false);
    s.apply_template(host);
    s.set_items(numbers(60)).unwrap();
    s.arrange(WIDTH, 200.0).unwrap();
    assert_eq!(offset(&s), 0.0);

    s.host_mut().unwrap().set_attached(true);
    s.arrange(WIDTH, 200.0).unwrap();
    assert_eq!(offset(&s), 20_040.0);
    assert_eq!(s.realized_range(), Some((-5, 5)));
    assert_eq!(logical_at_viewport_centre(&s), Some(0));
}

#[test]
fn nothing_is_realized_before_layout() {
    let mut s: Selector = LoopingSelector::new(SelectorOptions::new(ITEM_HEIGHT));
    s.set_items(numbers(60)).unwrap();
    assert_eq!(s.realized_range(), None);

    s.apply_template(MemoryScrollHost::new(200.0));
    s.set_items(numbers(60)).unwrap();
    assert!(!s.is_set_up());
    assert_eq!(s.realized_range(), None);

    s.arrange(WIDTH, 200.0).unwrap();
    assert!(s.is_set_up());
}

#[test]
fn unconfigured_item_height_never_sets_up() {
    let s = build(numbers(60), 200.0, SelectorOptions::default());
    assert!(!s.is_set_up());
    assert_eq!(s.realized_range(), None);
}

#[test]
fn oversized_viewport_is_left_alone() {
    let s = build(numbers(60), 200_000.0, SelectorOptions::new(ITEM_HEIGHT));
    assert_eq!(s.realized_range(), None);
    assert_eq!(s.pool_stats().total_created, 0);
}

#[test]
fn reapplying_the_template_starts_over() {
    let mut s = minute_wheel();
    user_scroll_by(&mut s, 5.0 * H);
    let old = s.apply_template(MemoryScrollHost::new(200.0)).unwrap();
    assert_eq!(old.vertical_offset(), 20_040.0);
    assert_eq!(s.pool().len(), 0);

    s.arrange(WIDTH, 200.0).unwrap();
    assert_eq!(s.selected_index(), 5);
    assert_eq!(logical_at_viewport_centre(&s), Some(5));
    assert_eq!(s.realized_range(), Some((0, 10)));

    assert!(s.detach().is_some());
    assert!(s.panel().is_none());
    assert_eq!(s.realized_range(), None);
}

#[test]
fn automation_select_and_scroll_percent() {
    let mut s = minute_wheel();
    assert!(s.is_setup_for_automation());
    assert!(s.automation_is_scrollable());
    assert_eq!(s.automation_scroll_percent(), 0.0);
    assert_eq!(s.automation_scroll_view_size(), 200.0 / (60.0 * H) * 100.0);
    s.take_events();

    s.select(30).unwrap();
    assert_eq!(s.selected_index(), 30);
    assert_eq!(s.automation_scroll_percent(), 50.0);
    let events = s.take_events();
    assert!(events.contains(&SelectorEvent::AutomationScrollPercentChanged { old: 0.0, new: 50.0 }));

    s.automation_set_scroll_percent(100.0).unwrap();
    assert_eq!(s.selected_index(), 59);
    s.automation_set_scroll_percent(0.0).unwrap();
    assert_eq!(s.selected_index(), 0);
    assert_eq!(
        s.automation_set_scroll_percent(150.0),
        Err(SelectorError::InvalidScrollPercent(150.0))
    );
    assert_window_consistent(&s);
}

#[test]
fn automation_scroll_moves_by_increments_and_stops_at_the_ends() {
    let mut s = minute_wheel();
    s.automation_scroll(ScrollAmount::LargeIncrement).unwrap();
    assert_eq!(s.selected_index(), 5);
    s.automation_scroll(ScrollAmount::SmallDecrement).unwrap();
    assert_eq!(s.selected_index(), 4);
    s.automation_scroll(ScrollAmount::LargeDecrement).unwrap();
    assert_eq!(s.selected_index(), 0);
    s.automation_scroll(ScrollAmount::SmallDecrement).unwrap();
    assert_eq!(s.selected_index(), 0);
    s.automation_scroll(ScrollAmount::NoAmount).unwrap();
    assert_eq!(s.selected_index(), 0);

    s.select(58).unwrap();
    s.automation_scroll(ScrollAmount::LargeIncrement).unwrap();
    assert_eq!(s.selected_index(), 59);
}

#[test]
fn selecting_after_scroll_into_view_measures_from_the_centre() {
    let mut s = minute_wheel();
    s.scroll_into_view(20).unwrap();
    assert_eq!(logical_at_viewport_centre(&s), Some(20));
    assert_eq!(s.selected_index(), 0);
    s.take_events();

    s.set_selected_index(5).unwrap();

    assert_eq!(s.selected_index(), 5);
    assert_eq!(logical_at_viewport_centre(&s), Some(5));
    assert!(selection_changes(&s.take_events()).is_empty());
    assert_window_consistent(&s);
}

#[test]
fn large_collections_take_the_short_way_round() {
    let mut s = build(numbers(1000), 200.0, SelectorOptions::new(ITEM_HEIGHT));
    // Two full cycles plus one: 200 + 2001 * 40
    assert_eq!(s.host().unwrap().extent_height(), 80_240.0);
    assert_eq!(offset(&s), 40_040.0);
    s.take_events();

    s.set_selected_index(900).unwrap();

    // 900 is 100 items up, not 900 down.
    assert_eq!(s.midpoint_index(), -100);
    assert_eq!(offset(&s), 40_040.0 - 100.0 * H);
    assert_eq!(s.selected_index(), 900);
    assert_eq!(logical_at_viewport_centre(&s), Some(900));
    assert!(selection_changes(&s.take_events()).is_empty());
    assert_window_consistent(&s);
}

#[test]
fn growing_a_looping_collection_resizes_the_panel() {
    let mut s = minute_wheel();
    assert_eq!(s.host().unwrap().extent_height(), 40_240.0);
    s.set_items(numbers(1000)).unwrap();
    assert_eq!(s.host().unwrap().extent_height(), 80_240.0);
    assert_eq!(logical_at_viewport_centre(&s), Some(0));
    assert_window_consistent(&s);
}

#[test]
fn any_populated_selector_is_scrollable_for_automation() {
    let mut s: Selector = LoopingSelector::new(SelectorOptions::new(ITEM_HEIGHT));
    assert!(!s.automation_is_scrollable());
    s.set_items(numbers(1)).unwrap();
    assert!(!s.is_set_up());
    assert!(s.automation_is_scrollable());
}

#[test]
fn scroll_into_view_navigates_without_selecting() {
    let mut s = minute_wheel();
    s.take_events();
    assert!(s.automation_try_scroll_item_into_view(&20).unwrap());
    assert_eq!(logical_at_viewport_centre(&s), Some(20));
    assert_eq!(s.selected_index(), 0);
    assert!(selection_changes(&s.take_events()).is_empty());
    assert!(!s.automation_try_scroll_item_into_view(&99).unwrap());

    // The next user scroll selects normally.
    user_scroll_by(&mut s, H);
    assert_eq!(s.selected_index(), 21);
}

#[test]
fn automation_realized_items_are_distinct() {
    let mut s = build(numbers(3), 200.0, SelectorOptions::new(ITEM_HEIGHT));
    assert_eq!(s.realized_len(), 11);
    let logicals = s.automation_realized_items();
    assert_eq!(logicals.len(), 3);
    assert_eq!(logicals.iter().collect::<BTreeSet<_>>().len(), 3);

    s.select(1).unwrap();
    assert_eq!(s.midpoint_index(), 1);
    assert_eq!(s.automation_selected_item().map(|id| s.item(id).unwrap().content()), Some(Some(1)));
}

#[test]
fn state_snapshot_matches_accessors() {
    let s = minute_wheel();
    let state = s.state();
    assert_eq!(state.realized_top_idx, -5);
    assert_eq!(state.realized_bottom_idx, 5);
    assert_eq!(state.midpoint_idx, 0);
    assert_eq!(state.selected_index, 0);
    assert_eq!(state.items_state, ItemsState::Expanded);
    assert_eq!(state.viewport, ViewportEdges { top: 20_040.0, bottom: 20_240.0 });
    assert_eq!(state.viewport.height(), 200.0);
    assert_eq!(state.realized.top, 19_920.0);
}

proptest! {
    #[test]
    fn random_scrolling_keeps_the_window_consistent(
        steps in proptest::collection::vec((-30i32..30, any::<bool>(), any::<bool>()), 1..24),
        n in 1u32..80,
        should_loop in any::<bool>(),
    ) {
        let options = SelectorOptions::new(ITEM_HEIGHT).with_should_loop(should_loop);
        let mut s = build(numbers(n), 200.0, options);
        for (items, whole, settle) in steps {
            let delta = if whole { f64::from(items) * H } else { f64::from(items) * 7.0 };
            let to = offset(&s) + delta;
            if settle {
                user_scroll_to(&mut s, to);
            } else {
                s.host_mut().unwrap().user_drag_to(to);
                s.process_host_events().unwrap();
            }
            assert_window_consistent(&s);
            prop_assert!(s.realized_len() <= 12);
            if let Some((top, bottom)) = s.realized_range() {
                if !should_loop {
                    prop_assert!(top >= 0);
                    prop_assert!(bottom < i64::from(n));
                }
            }
            if should_loop {
                prop_assert_eq!(s.selected_index(), positive_mod(s.midpoint_index(), n as usize));
            }
            prop_assert!(s.selected_index() < n as usize);
        }
    }
}
