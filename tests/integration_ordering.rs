use dockwm::config::WmConfig;
use dockwm::dock::{DockEdge, RailDock};
use dockwm::geometry::Point;
use dockwm::input::MouseState;
use dockwm::window::decorator::ChromeLayout;
use dockwm::window::{RegistryError, WindowId, WindowManager, WindowOptions};

fn manager() -> WindowManager {
    let config = WmConfig::default();
    let dock = RailDock::new(config.dock_edge, config.dock_thickness, config.desktop_rect());
    WindowManager::new(config, Some(Box::new(dock)))
}

fn open(wm: &mut WindowManager, titles: &[&str]) -> Vec<WindowId> {
    let ids = titles
        .iter()
        .map(|t| wm.open(t, WindowOptions::default()).expect("open"))
        .collect();
    for _ in 0..20 {
        wm.update(&MouseState::idle(Point::new(1919.0, 1079.0)), 0.05);
    }
    ids
}

#[test]
fn topmost_under_point_prefers_higher_rank() {
    let mut wm = manager();
    let ids = open(&mut wm, &["A", "Filler", "B"]);
    let (a, b) = (ids[0], ids[2]);
    let p = Point::new(200.0, 200.0);
    assert!(wm.bounds(a).is_some_and(|r| r.contains(p)));
    assert!(wm.bounds(b).is_some_and(|r| r.contains(p)));
    assert!(wm.z_rank(b) > wm.z_rank(a));
    assert_eq!(wm.topmost_under_point(p), Some(b));
    assert!(wm.registry().is_topmost_under_point(b, p));
    assert!(!wm.registry().is_topmost_under_point(a, p));
}

#[test]
fn refocusing_a_pinned_window_puts_it_on_top_of_the_pins() {
    let mut wm = manager();
    let ids = open(&mut wm, &["A", "B", "X", "Y"]);
    let (a, b, x, y) = (ids[0], ids[1], ids[2], ids[3]);
    wm.set_pinned(a, true);
    wm.set_pinned(b, true);
    assert_eq!(wm.registry().order(), &[x, y, a, b]);
    wm.bring_to_front(a);
    assert_eq!(wm.registry().order(), &[x, y, b, a]);

    // Focusing an unpinned window keeps it under the pinned band.
    wm.bring_to_front(x);
    assert_eq!(wm.registry().order(), &[y, x, b, a]);
}

#[test]
fn unpinning_leaves_rank_until_next_focus() {
    let mut wm = manager();
    let ids = open(&mut wm, &["X", "Y"]);
    let (x, y) = (ids[0], ids[1]);
    wm.set_pinned(y, true);
    assert_eq!(wm.registry().order(), &[x, y]);
    let rank = wm.z_rank(y);

    wm.set_pinned(y, false);
    assert_eq!(wm.registry().order(), &[x, y]);
    assert_eq!(wm.z_rank(y), rank);
    assert!(wm.registry().pinned_order().is_empty());
}

#[test]
fn pin_button_toggles_without_focus_change() {
    let mut wm = manager();
    let ids = open(&mut wm, &["A", "B"]);
    let (a, b) = (ids[0], ids[1]);
    assert_eq!(wm.focused(), Some(b));

    // B covers A's title bar buttons, so pin B itself.
    let pin = ChromeLayout::for_bounds(wm.bounds(b).expect("bounds")).pin.center();
    wm.update(&MouseState::pressed(pin), 0.016);
    wm.update(&MouseState::released(pin), 0.016);
    assert!(wm.is_pinned(b));
    assert_eq!(wm.registry().pinned_order(), &[b]);

    wm.bring_to_front(a);
    assert_eq!(wm.registry().order(), &[a, b]);
    assert_eq!(wm.focused(), Some(a));
}

#[test]
fn registration_is_a_typed_lookup() {
    let mut wm = manager();
    let id = wm.register("Settings", WindowOptions::default()).expect("register");
    assert_eq!(wm.registry().find_by_title("Settings"), Some(id));
    assert!(!wm.registry().is_open(id));
    assert_eq!(
        wm.register("Settings", WindowOptions::default()),
        Err(RegistryError::DuplicateTitle("Settings".to_string()))
    );
    let ghost = WindowId::from_raw(404);
    assert_eq!(
        wm.handle_external_activation_request(ghost),
        Err(RegistryError::UnknownWindow(ghost))
    );
}

#[test]
fn switching_dock_edge_pushes_windows_out_of_the_rail() {
    let mut wm = manager();
    let ids = open(&mut wm, &["Low"]);
    let id = ids[0];
    // Drag the window down against the bottom of the screen.
    wm.update(&MouseState::pressed(Point::new(150.0, 45.0)), 0.016);
    wm.update(&MouseState::held(Point::new(150.0, 1070.0)), 0.016);
    wm.update(&MouseState::released(Point::new(150.0, 1070.0)), 0.016);
    assert_eq!(wm.bounds(id).map(|r| r.bottom()), Some(1080.0));

    wm.set_dock_edge(DockEdge::Bottom);
    assert_eq!(wm.bounds(id).map(|r| r.bottom()), Some(1020.0));
}
