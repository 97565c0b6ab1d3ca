//! Integration tests for the basic dockable pane group.

use threepane::dock::{PaneConfig, PaneDivider, PaneGroup, PaneSide};
use threepane::widgets::Separator;
use threepane_test_utils::{HeadlessHost, HostProbe};

fn standard_group(host: HeadlessHost) -> (PaneGroup, HostProbe) {
    let probe = host.probe();
    let group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(PaneSide::Left, PaneConfig::new().title("Files"), |pane| {
            pane.label("file list");
        })
        .pane(PaneSide::Center, PaneConfig::center().title("Editor"), |pane| {
            pane.label("buffer");
        })
        .pane(PaneSide::Right, PaneConfig::new().title("Inspector"), |pane| {
            pane.label("properties");
        })
        .build();
    (group, probe)
}

#[test]
fn all_panes_start_attached() {
    let (group, probe) = standard_group(HeadlessHost::new());
    assert_eq!(group.attached_count(), 3);
    assert_eq!(
        group.attached_order(),
        vec![PaneSide::Left, PaneSide::Center, PaneSide::Right],
    );
    assert_eq!(probe.open_count(), 0);
}

#[test]
fn detach_opens_an_intercepted_window() {
    let (mut group, probe) = standard_group(HeadlessHost::new());

    assert!(group.detach(PaneSide::Left));
    assert!(group.is_detached(PaneSide::Left));
    assert!(!group.is_attached(PaneSide::Left));
    assert_eq!(group.attached_count(), 2);

    let window = group.detached_window(PaneSide::Left).unwrap();
    assert_eq!(probe.open_windows(), vec![window]);
    assert_eq!(probe.window_title(window).as_deref(), Some("Files"));
    assert!(probe.is_intercepted(window));
}

#[test]
fn reattach_closes_the_window_and_restores_the_pane() {
    let (mut group, probe) = standard_group(HeadlessHost::new());
    group.detach(PaneSide::Left);

    assert!(group.reattach(PaneSide::Left));
    assert!(group.is_attached(PaneSide::Left));
    assert_eq!(probe.open_count(), 0);
    assert_eq!(probe.closed_count(), 1);
    assert_eq!(
        group.attached_order(),
        vec![PaneSide::Left, PaneSide::Center, PaneSide::Right],
    );
}

#[test]
fn builder_runs_once_per_content_creation() {
    let (mut group, _) = standard_group(HeadlessHost::new());
    assert_eq!(group.build_count(PaneSide::Left), 1);

    group.detach(PaneSide::Left);
    assert_eq!(group.build_count(PaneSide::Left), 2);

    group.reattach(PaneSide::Left);
    assert_eq!(group.build_count(PaneSide::Left), 3);
    // The untouched panes were only built once.
    assert_eq!(group.build_count(PaneSide::Center), 1);
    assert_eq!(group.build_count(PaneSide::Right), 1);
}

#[test]
fn double_detach_and_double_reattach_are_no_ops() {
    let (mut group, probe) = standard_group(HeadlessHost::new());

    assert!(group.detach(PaneSide::Right));
    assert!(!group.detach(PaneSide::Right));
    assert_eq!(probe.created_count(), 1);

    assert!(group.reattach(PaneSide::Right));
    assert!(!group.reattach(PaneSide::Right));
    assert_eq!(probe.closed_count(), 1);
}

#[test]
fn center_pane_cannot_detach() {
    let (mut group, probe) = standard_group(HeadlessHost::new());
    assert!(!group.detach(PaneSide::Center));
    assert!(group.is_attached(PaneSide::Center));
    assert_eq!(probe.created_count(), 0);
}

#[test]
fn center_absorbs_freed_space() {
    let (mut group, _) = standard_group(HeadlessHost::new());
    // 800 total, 200 per side pane.
    assert_eq!(group.pane_width(PaneSide::Center), Some(400.0));

    group.detach(PaneSide::Left);
    assert_eq!(group.pane_width(PaneSide::Center), Some(600.0));

    group.detach(PaneSide::Right);
    assert_eq!(group.pane_width(PaneSide::Center), Some(800.0));

    group.reattach(PaneSide::Left);
    group.reattach(PaneSide::Right);
    assert_eq!(group.pane_width(PaneSide::Center), Some(400.0));
}

#[test]
fn reattach_restores_canonical_order() {
    let (mut group, _) = standard_group(HeadlessHost::new());
    group.detach(PaneSide::Left);
    group.detach(PaneSide::Right);
    assert_eq!(group.attached_order(), vec![PaneSide::Center]);

    // Reattach in the opposite order they were detached.
    group.reattach(PaneSide::Right);
    assert_eq!(
        group.attached_order(),
        vec![PaneSide::Center, PaneSide::Right],
    );
    group.reattach(PaneSide::Left);
    assert_eq!(
        group.attached_order(),
        vec![PaneSide::Left, PaneSide::Center, PaneSide::Right],
    );
}

#[test]
fn fixed_width_pins_min_and_max() {
    let host = HeadlessHost::new();
    let mut group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(
            PaneSide::Left,
            PaneConfig::new().fixed_width(150.0),
            |_| {},
        )
        .build();

    assert!(group.is_left_fixed());
    assert_eq!(group.pane_width(PaneSide::Left), Some(150.0));
    assert_eq!(group.pane_min_width(PaneSide::Left), Some(150.0));
    assert_eq!(group.pane_max_width(PaneSide::Left), Some(150.0));

    // Divider drags leave the width unchanged.
    assert!(!group.drag_divider(PaneDivider::Left, 80.0));
    assert_eq!(group.pane_width(PaneSide::Left), Some(150.0));

    // So does resizing the whole container.
    group.set_size(1200.0, 600.0);
    assert_eq!(group.pane_width(PaneSide::Left), Some(150.0));
}

#[test]
fn fixed_width_without_max_capability_pins_width_and_min_only() {
    let host = HeadlessHost::without_max_size();
    let group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(
            PaneSide::Left,
            PaneConfig::new().fixed_width(150.0),
            |_| {},
        )
        .build();

    assert_eq!(group.pane_width(PaneSide::Left), Some(150.0));
    assert_eq!(group.pane_min_width(PaneSide::Left), Some(150.0));
    assert_eq!(group.pane_max_width(PaneSide::Left), None);
}

#[test]
fn non_resizable_pane_rejects_divider_drags() {
    let host = HeadlessHost::new();
    let mut group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(
            PaneSide::Right,
            PaneConfig::new().resizable(false).default_width(180.0),
            |_| {},
        )
        .build();

    assert!(group.is_right_fixed());
    assert!(!group.drag_divider(PaneDivider::Right, -40.0));
    assert_eq!(group.pane_width(PaneSide::Right), Some(180.0));
}

#[test]
fn only_center_changes_when_the_container_resizes() {
    let host = HeadlessHost::new();
    let mut group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(
            PaneSide::Left,
            PaneConfig::new().fixed_width(200.0),
            |_| {},
        )
        .pane(PaneSide::Center, PaneConfig::center(), |_| {})
        .pane(
            PaneSide::Right,
            PaneConfig::new().resizable(false).default_width(150.0),
            |_| {},
        )
        .build();

    assert_eq!(group.pane_width(PaneSide::Left), Some(200.0));
    assert_eq!(group.pane_width(PaneSide::Center), Some(450.0));
    assert_eq!(group.pane_width(PaneSide::Right), Some(150.0));

    assert!(!group.drag_divider(PaneDivider::Left, 60.0));
    assert!(!group.drag_divider(PaneDivider::Right, -60.0));

    group.set_size(1000.0, 600.0);
    assert_eq!(group.pane_width(PaneSide::Left), Some(200.0));
    assert_eq!(group.pane_width(PaneSide::Center), Some(650.0));
    assert_eq!(group.pane_width(PaneSide::Right), Some(150.0));
}

#[test]
fn divider_drag_clamps_to_constraints() {
    let host = HeadlessHost::new();
    let mut group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(
            PaneSide::Left,
            PaneConfig::new().min_width(150.0).max_width(300.0),
            |_| {},
        )
        .build();

    // Grow past the max: clamped to 300.
    assert!(group.drag_divider(PaneDivider::Left, 500.0));
    assert_eq!(group.pane_width(PaneSide::Left), Some(300.0));

    // Shrink past the min: clamped to 150.
    assert!(group.drag_divider(PaneDivider::Left, -500.0));
    assert_eq!(group.pane_width(PaneSide::Left), Some(150.0));

    // Already at the min; a further shrink changes nothing.
    assert!(!group.drag_divider(PaneDivider::Left, -10.0));
}

#[test]
fn window_close_reattaches_instead_of_destroying() {
    let (mut group, probe) = standard_group(HeadlessHost::new());
    group.detach(PaneSide::Left);
    let window = group.detached_window(PaneSide::Left).unwrap();

    assert!(group.handle_window_close(window));
    assert!(group.is_attached(PaneSide::Left));
    assert_eq!(probe.open_count(), 0);

    // Unknown windows are ignored.
    assert!(!group.handle_window_close(window));
}

#[test]
fn affordance_clicks_drive_detach_and_reattach() {
    let (mut group, _) = standard_group(HeadlessHost::new());

    let detach = group.detach_button(PaneSide::Right).unwrap();
    assert!(group.on_click(detach));
    assert!(group.is_detached(PaneSide::Right));
    // The button died with the frame.
    assert!(!group.on_click(detach));

    let window = group.detached_window(PaneSide::Right).unwrap();
    let reattach = group.reattach_button(PaneSide::Right).unwrap();
    assert!(group.on_window_click(window, reattach));
    assert!(group.is_attached(PaneSide::Right));
}

#[test]
fn frame_builder_composes_labels_separators_and_buttons() {
    let host = HeadlessHost::new();
    let group = PaneGroup::builder(Box::new(host))
        .size(800.0, 600.0)
        .pane(PaneSide::Left, PaneConfig::new().title("Files"), |pane| {
            pane.label("file list");
            pane.separator();
            pane.button("refresh");
        })
        .build();

    let row = group.tree().root().unwrap();
    let frame = group.tree().children(row)[0];
    let content = group.tree().children(frame);
    // Detach affordance, then the builder's label, separator, and button.
    assert_eq!(content.len(), 4);
    assert!(group.tree().widget::<Separator>(content[1]).is_none());
    let separator = group
        .tree()
        .widget::<Separator>(content[2])
        .expect("separator widget at its insertion order");
    assert_eq!(separator.style.background_color, None);
}

#[test]
fn detached_content_is_rebuilt_not_reparented() {
    let (mut group, _) = standard_group(HeadlessHost::new());
    let nodes_before = group.tree().node_count();

    group.detach(PaneSide::Left);
    // The shared tree lost the left frame and its content entirely.
    assert!(group.tree().node_count() < nodes_before);

    group.reattach(PaneSide::Left);
    assert_eq!(group.tree().node_count(), nodes_before);
}
