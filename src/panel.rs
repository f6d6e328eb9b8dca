//! Open/closed state for a panel that dismisses itself on outside presses
//! and on the escape key.

use crate::events::{EventHub, EventKind, InputEvent, Key, ListenerId};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Answers whether a pointer target lies inside the panel.
pub trait Boundary<T> {
    fn contains(&self, target: &T) -> bool;
}

impl<T, F> Boundary<T> for F
where
    F: Fn(&T) -> bool,
{
    fn contains(&self, target: &T) -> bool {
        self(target)
    }
}

#[derive(Debug, Clone, Copy)]
enum CloseCause {
    Toggle,
    Requested,
    OutsidePointer,
    Escape,
}

/// The pair of hub listeners that exist while the panel is open.
///
/// Dropping it detaches both, whichever way the panel was closed.
struct Subscription<T: 'static> {
    hub: EventHub<T>,
    ids: [ListenerId; 2],
}

impl<T: 'static> Subscription<T> {
    fn attach(hub: &EventHub<T>, panel: Weak<PanelShared<T>>) -> Self {
        let on_pointer = Weak::clone(&panel);
        let pointer_id = hub.add_listener(EventKind::PointerDown, move |event| {
            let InputEvent::PointerDown { target } = event else {
                return;
            };
            if let Some(panel) = on_pointer.upgrade()
                && panel.is_outside(target)
            {
                panel.close(CloseCause::OutsidePointer);
            }
        });

        let key_id = hub.add_listener(EventKind::KeyDown, move |event| {
            if let InputEvent::KeyDown { key: Key::Escape } = event
                && let Some(panel) = panel.upgrade()
            {
                panel.close(CloseCause::Escape);
            }
        });

        log::debug!("panel listeners attached: {pointer_id:?}, {key_id:?}");

        Self {
            hub: hub.clone(),
            ids: [pointer_id, key_id],
        }
    }
}

impl<T: 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        for id in self.ids {
            self.hub.remove_listener(id);
        }
        log::debug!("panel listeners detached: {:?}", self.ids);
    }
}

struct PanelShared<T: 'static> {
    is_open: Cell<bool>,
    root: RefCell<Option<Box<dyn Boundary<T>>>>,
    subscription: RefCell<Option<Subscription<T>>>,
}

impl<T: 'static> PanelShared<T> {
    /// A press with no root mounted is never treated as outside.
    fn is_outside(&self, target: &T) -> bool {
        self.root
            .borrow()
            .as_ref()
            .is_some_and(|root| !root.contains(target))
    }

    fn close(&self, cause: CloseCause) {
        if !self.is_open.replace(false) {
            return;
        }
        // Take first so the hub is not touched while the cell is borrowed.
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
        log::debug!("panel closed ({cause:?})");
    }
}

/// Tracks whether a dismissible panel is open.
///
/// While open, the controller keeps exactly two listeners on its hub: one
/// closing the panel on a pointer press outside the current root boundary,
/// one closing it on escape. While closed it keeps none. Listeners read the
/// root through shared state, so [`set_root`](Self::set_root) takes effect on
/// the very next event.
pub struct PanelVisibilityController<T: 'static> {
    hub: EventHub<T>,
    shared: Rc<PanelShared<T>>,
}

impl<T: 'static> PanelVisibilityController<T> {
    pub fn new(hub: &EventHub<T>) -> Self {
        Self {
            hub: hub.clone(),
            shared: Rc::new(PanelShared {
                is_open: Cell::new(false),
                root: RefCell::new(None),
                subscription: RefCell::new(None),
            }),
        }
    }

    pub fn is_open(&self) -> bool {
        self.shared.is_open.get()
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.shared.close(CloseCause::Toggle);
        } else {
            self.open();
        }
    }

    /// Closes the panel. Does nothing if it is already closed.
    pub fn request_close(&self) {
        self.shared.close(CloseCause::Requested);
    }

    fn open(&self) {
        self.shared.is_open.set(true);
        let subscription = Subscription::attach(&self.hub, Rc::downgrade(&self.shared));
        if self.shared.subscription.replace(Some(subscription)).is_some() {
            log::warn!("panel opened while already subscribed");
        }
        log::debug!("panel opened");
    }

    /// Sets the region that counts as inside the panel.
    pub fn set_root(&self, root: impl Boundary<T> + 'static) {
        *self.shared.root.borrow_mut() = Some(Box::new(root));
    }

    pub fn clear_root(&self) {
        *self.shared.root.borrow_mut() = None;
    }

    /// Number of hub listeners this controller currently owns.
    pub fn attached_listeners(&self) -> usize {
        self.shared
            .subscription
            .borrow()
            .as_ref()
            .map_or(0, |subscription| subscription.ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Minimal node tree standing in for a document.
    #[derive(Default)]
    struct Tree {
        parents: Vec<Option<usize>>,
    }

    impl Tree {
        fn node(&mut self, parent: Option<usize>) -> usize {
            self.parents.push(parent);
            self.parents.len() - 1
        }

        fn contains(&self, ancestor: usize, mut node: usize) -> bool {
            loop {
                if node == ancestor {
                    return true;
                }
                match self.parents[node] {
                    Some(parent) => node = parent,
                    None => return false,
                }
            }
        }
    }

    /// body > (toggle button, aside > form > select, article)
    struct Page {
        tree: Rc<Tree>,
        toggle: usize,
        form: usize,
        select: usize,
        article: usize,
    }

    fn page() -> Page {
        let mut tree = Tree::default();
        let body = tree.node(None);
        let toggle = tree.node(Some(body));
        let aside = tree.node(Some(body));
        let form = tree.node(Some(aside));
        let select = tree.node(Some(form));
        let article = tree.node(Some(body));
        Page {
            tree: Rc::new(tree),
            toggle,
            form,
            select,
            article,
        }
    }

    fn root_at(tree: &Rc<Tree>, root: usize) -> impl Boundary<usize> + 'static {
        let tree = Rc::clone(tree);
        move |target: &usize| tree.contains(root, *target)
    }

    fn press(target: usize) -> InputEvent<usize> {
        InputEvent::PointerDown { target }
    }

    fn key(key: Key) -> InputEvent<usize> {
        InputEvent::KeyDown { key }
    }

    fn mounted_panel(hub: &EventHub<usize>, page: &Page) -> PanelVisibilityController<usize> {
        let panel = PanelVisibilityController::new(hub);
        panel.set_root(root_at(&page.tree, page.form));
        panel
    }

    #[test]
    fn starts_closed_without_listeners() {
        let hub = EventHub::new();
        let panel = PanelVisibilityController::<usize>::new(&hub);
        assert!(!panel.is_open());
        assert_eq!(panel.attached_listeners(), 0);
        assert_eq!(hub.listener_count(), 0);
    }

    proptest! {
        #[test]
        fn toggle_parity(n in 0usize..200) {
            let hub = EventHub::<usize>::new();
            let panel = PanelVisibilityController::new(&hub);
            for _ in 0..n {
                panel.toggle();
            }
            prop_assert_eq!(panel.is_open(), n % 2 == 1);
            prop_assert_eq!(hub.listener_count(), if n % 2 == 1 { 2 } else { 0 });
        }
    }

    #[test]
    fn listener_count_tracks_open_state_across_cycles() {
        let page = page();
        let hub = EventHub::new();
        let panel = mounted_panel(&hub, &page);

        for cycle in 0..100 {
            panel.toggle();
            assert!(panel.is_open());
            assert_eq!(hub.listener_count_for(EventKind::PointerDown), 1);
            assert_eq!(hub.listener_count_for(EventKind::KeyDown), 1);
            assert_eq!(panel.attached_listeners(), 2);

            match cycle % 4 {
                0 => panel.toggle(),
                1 => panel.request_close(),
                2 => {
                    hub.dispatch(&key(Key::Escape));
                }
                _ => {
                    hub.dispatch(&press(page.article));
                }
            }

            assert!(!panel.is_open(), "cycle {cycle} left the panel open");
            assert_eq!(hub.listener_count(), 0);
            assert_eq!(panel.attached_listeners(), 0);
        }
    }

    #[test]
    fn outside_press_closes() {
        let page = page();
        let hub = EventHub::new();
        let panel = mounted_panel(&hub, &page);
        panel.toggle();

        hub.dispatch(&press(page.article));

        assert!(!panel.is_open());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn inside_press_keeps_panel_open() {
        let page = page();
        let hub = EventHub::new();
        let panel = mounted_panel(&hub, &page);
        panel.toggle();

        hub.dispatch(&press(page.select));
        hub.dispatch(&press(page.form));

        assert!(panel.is_open());
        assert_eq!(panel.attached_listeners(), 2);
    }

    #[test]
    fn escape_closes_and_other_keys_do_not() {
        let page = page();
        let hub = EventHub::new();
        let panel = mounted_panel(&hub, &page);
        panel.toggle();

        hub.dispatch(&key(Key::Enter));
        hub.dispatch(&key(Key::Character('q')));
        assert!(panel.is_open());

        hub.dispatch(&key(Key::Escape));
        assert!(!panel.is_open());
    }

    #[test]
    fn press_without_root_never_closes() {
        let page = page();
        let hub = EventHub::new();
        let panel = PanelVisibilityController::new(&hub);
        panel.toggle();

        hub.dispatch(&press(page.article));
        assert!(panel.is_open());

        panel.set_root(root_at(&page.tree, page.form));
        panel.clear_root();
        hub.dispatch(&press(page.article));
        assert!(panel.is_open());
    }

    #[test]
    fn listeners_read_the_latest_root() {
        let page = page();
        let hub = EventHub::new();
        let panel = mounted_panel(&hub, &page);
        panel.toggle();

        // The panel re-rendered into the article region.
        panel.set_root(root_at(&page.tree, page.article));

        hub.dispatch(&press(page.article));
        assert!(panel.is_open());

        hub.dispatch(&press(page.select));
        assert!(!panel.is_open());
    }

    #[test]
    fn request_close_is_idempotent() {
        let hub = EventHub::<usize>::new();
        let panel = PanelVisibilityController::new(&hub);

        panel.request_close();
        assert!(!panel.is_open());

        panel.toggle();
        panel.request_close();
        panel.request_close();
        assert!(!panel.is_open());
        assert_eq!(hub.listener_count(), 0);

        panel.toggle();
        assert!(panel.is_open());
        assert_eq!(hub.listener_count(), 2);
    }

    #[test]
    fn press_on_toggle_region_does_not_race_the_toggle() {
        let page = page();
        let hub = EventHub::new();
        let panel = PanelVisibilityController::new(&hub);
        let tree = Rc::clone(&page.tree);
        let (form, toggle) = (page.form, page.toggle);
        panel.set_root(move |target: &usize| {
            tree.contains(form, *target) || tree.contains(toggle, *target)
        });

        // Opening gesture: press reaches no panel listener, release toggles.
        hub.dispatch(&press(page.toggle));
        panel.toggle();
        assert!(panel.is_open());

        // Closing gesture: press on the toggle is not outside, release toggles.
        hub.dispatch(&press(page.toggle));
        assert!(panel.is_open());
        panel.toggle();
        assert!(!panel.is_open());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn opening_from_a_press_ignores_that_same_press() {
        let page = page();
        let hub = EventHub::new();
        let panel = Rc::new(mounted_panel(&hub, &page));

        let opener = Rc::clone(&panel);
        let toggle = page.toggle;
        let host_id = hub.add_listener(EventKind::PointerDown, move |event| {
            if let InputEvent::PointerDown { target } = event
                && *target == toggle
            {
                opener.toggle();
            }
        });

        hub.dispatch(&press(page.toggle));
        assert!(panel.is_open());

        hub.remove_listener(host_id);
        hub.dispatch(&press(page.article));
        assert!(!panel.is_open());
    }

    #[test]
    fn controllers_sharing_a_hub_filter_their_own_roots() {
        let page = page();
        let hub = EventHub::new();
        let settings = mounted_panel(&hub, &page);
        let notes = PanelVisibilityController::new(&hub);
        notes.set_root(root_at(&page.tree, page.article));

        settings.toggle();
        notes.toggle();
        assert_eq!(hub.listener_count(), 4);

        hub.dispatch(&press(page.article));
        assert!(!settings.is_open());
        assert!(notes.is_open());
        assert_eq!(hub.listener_count(), 2);

        hub.dispatch(&key(Key::Escape));
        assert!(!notes.is_open());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn escape_closes_every_open_panel_once() {
        let hub = EventHub::<usize>::new();
        let first = PanelVisibilityController::new(&hub);
        let second = PanelVisibilityController::new(&hub);
        first.toggle();
        second.toggle();

        assert_eq!(hub.dispatch(&key(Key::Escape)), 2);
        assert!(!first.is_open());
        assert!(!second.is_open());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn dropping_an_open_controller_detaches_its_listeners() {
        let hub = EventHub::<usize>::new();
        let panel = PanelVisibilityController::new(&hub);
        panel.toggle();
        assert_eq!(hub.listener_count(), 2);

        drop(panel);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&key(Key::Escape)), 0);
    }
}
