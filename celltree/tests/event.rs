use celltree::{Modifiers, MouseButton, PointerEvent, PointerKind};

#[test]
fn test_pointer_event_builder() {
    let event = PointerEvent::new(PointerKind::ContextMenu, "td-3")
        .at(12, 4)
        .button(MouseButton::Right)
        .modifiers(Modifiers::ctrl());

    assert_eq!(event.target.as_deref(), Some("td-3"));
    assert_eq!((event.x, event.y), (12, 4));
    assert_eq!(event.button, MouseButton::Right);
    assert!(event.modifiers.ctrl);
    assert!(!event.modifiers.none());
}

#[test]
fn test_untargeted_event_defaults() {
    let event = PointerEvent::untargeted(PointerKind::Leave);
    assert_eq!(event.target, None);
    assert_eq!(event.button, MouseButton::Left);
    assert!(event.modifiers.none());
    assert!(Modifiers::shift().shift);
}

#[test]
fn test_pointer_kind_names() {
    let names: Vec<_> = [
        PointerKind::Click,
        PointerKind::DoubleClick,
        PointerKind::ContextMenu,
        PointerKind::Enter,
        PointerKind::Leave,
    ]
    .iter()
    .map(PointerKind::name)
    .collect();
    assert_eq!(names, vec!["click", "dblclick", "contextmenu", "mouseenter", "mouseleave"]);
}
