//! Category selection and card filtering
//!
//! The active category is held as explicit state ([`CategorySelection`]) and
//! card visibility is a pure function of that state. DOM bindings implement
//! [`CategoryButton`] and [`Card`]; tests use in-memory fakes.

use std::fmt;

/// Opaque tag grouping cards and buttons into a topic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

pub trait CategoryButton {
    fn category(&self) -> &CategoryId;
    /// Whether the markup shipped this button pre-selected
    fn is_marked_active(&self) -> bool;
    fn set_active(&self, active: bool);
}

pub trait Card {
    fn category(&self) -> &CategoryId;
    fn set_visibility(&self, visibility: Visibility);
}

/// The button currently carrying the active marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCategory {
    pub button: usize,
    pub category: CategoryId,
}

/// Which category button is selected, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    active: Option<ActiveCategory>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, button: usize, category: CategoryId) {
        self.active = Some(ActiveCategory { button, category });
    }

    pub fn active(&self) -> Option<&ActiveCategory> {
        self.active.as_ref()
    }

    pub fn active_category(&self) -> Option<&CategoryId> {
        self.active.as_ref().map(|a| &a.category)
    }

    pub fn is_active(&self, button: usize) -> bool {
        self.active.as_ref().is_some_and(|a| a.button == button)
    }
}

/// Visibility of a card with category `card` while `active` is selected
pub fn visibility_for(card: &CategoryId, active: &CategoryId) -> Visibility {
    if card == active {
        Visibility::Shown
    } else {
        Visibility::Hidden
    }
}

/// Show cards in `category`, hide the rest
pub fn set_visible_category<C: Card>(cards: &[C], category: &CategoryId) {
    for card in cards {
        card.set_visibility(visibility_for(card.category(), category));
    }
}

/// Push `selection` onto the page. With nothing selected the page is left as is.
pub fn apply_selection<B: CategoryButton, C: Card>(
    selection: &CategorySelection,
    buttons: &[B],
    cards: &[C],
) {
    let Some(active) = selection.active() else {
        return;
    };

    for (index, button) in buttons.iter().enumerate() {
        button.set_active(index == active.button);
    }
    set_visible_category(cards, &active.category);
}

/// Handle a click on the button at `index`, returning the newly active category
pub fn select_button<B: CategoryButton, C: Card>(
    selection: &mut CategorySelection,
    buttons: &[B],
    cards: &[C],
    index: usize,
) -> Option<CategoryId> {
    let button = buttons.get(index)?;
    let category = button.category().clone();
    selection.select(index, category.clone());
    apply_selection(selection, buttons, cards);
    Some(category)
}

/// Selection implied by the markup: the first pre-marked button in document
/// order wins and is applied to the page. With no marked button nothing changes.
pub fn initial_selection<B: CategoryButton, C: Card>(buttons: &[B], cards: &[C]) -> CategorySelection {
    let mut selection = CategorySelection::new();
    if let Some(index) = buttons.iter().position(|b| b.is_marked_active()) {
        select_button(&mut selection, buttons, cards, index);
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeButton {
        category: CategoryId,
        active: Cell<bool>,
    }

    impl FakeButton {
        fn new(category: &str, active: bool) -> Self {
            Self { category: category.into(), active: Cell::new(active) }
        }
    }

    impl CategoryButton for FakeButton {
        fn category(&self) -> &CategoryId {
            &self.category
        }

        fn is_marked_active(&self) -> bool {
            self.active.get()
        }

        fn set_active(&self, active: bool) {
            self.active.set(active);
        }
    }

    struct FakeCard {
        category: CategoryId,
        visibility: Cell<Option<Visibility>>,
    }

    impl FakeCard {
        fn new(category: &str) -> Self {
            Self { category: category.into(), visibility: Cell::new(None) }
        }
    }

    impl Card for FakeCard {
        fn category(&self) -> &CategoryId {
            &self.category
        }

        fn set_visibility(&self, visibility: Visibility) {
            self.visibility.set(Some(visibility));
        }
    }

    fn page() -> (Vec<FakeButton>, Vec<FakeCard>) {
        let buttons = vec![
            FakeButton::new("writing", true),
            FakeButton::new("coding", false),
            FakeButton::new("images", false),
        ];
        let cards = vec![
            FakeCard::new("writing"),
            FakeCard::new("coding"),
            FakeCard::new("coding"),
            FakeCard::new("images"),
        ];
        (buttons, cards)
    }

    fn visibilities(cards: &[FakeCard]) -> Vec<Option<Visibility>> {
        cards.iter().map(|c| c.visibility.get()).collect()
    }

    #[test]
    fn test_click_leaves_exactly_one_active_button() {
        let (buttons, cards) = page();
        let mut selection = CategorySelection::new();

        for clicked in [1, 2, 0, 2] {
            select_button(&mut selection, &buttons, &cards, clicked);
            let active: Vec<usize> = buttons
                .iter()
                .enumerate()
                .filter(|(_, b)| b.active.get())
                .map(|(i, _)| i)
                .collect();
            assert_eq!(active, vec![clicked]);
            assert!(selection.is_active(clicked));
        }
    }

    #[test]
    fn test_card_shown_iff_category_matches() {
        let (buttons, cards) = page();
        let mut selection = CategorySelection::new();

        let category = select_button(&mut selection, &buttons, &cards, 1);
        assert_eq!(category, Some(CategoryId::from("coding")));

        for card in &cards {
            let expected = if card.category.as_str() == "coding" {
                Visibility::Shown
            } else {
                Visibility::Hidden
            };
            assert_eq!(card.visibility.get(), Some(expected));
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let (_, cards) = page();
        let category = CategoryId::from("images");

        set_visible_category(&cards, &category);
        let once = visibilities(&cards);
        set_visible_category(&cards, &category);
        assert_eq!(visibilities(&cards), once);
    }

    #[test]
    fn test_unknown_category_hides_all_cards() {
        let (_, cards) = page();
        set_visible_category(&cards, &CategoryId::from("music"));
        assert!(cards.iter().all(|c| c.visibility.get() == Some(Visibility::Hidden)));
    }

    #[test]
    fn test_empty_selection_leaves_page_untouched() {
        let (buttons, cards) = page();
        apply_selection(&CategorySelection::new(), &buttons, &cards);

        assert!(buttons[0].active.get());
        assert!(cards.iter().all(|c| c.visibility.get().is_none()));
    }

    #[test]
    fn test_applying_selection_clears_stray_markers() {
        let (buttons, cards) = page();
        buttons[2].set_active(true);

        let mut selection = CategorySelection::new();
        selection.select(0, "writing".into());
        apply_selection(&selection, &buttons, &cards);

        assert!(buttons[0].active.get());
        assert!(!buttons[2].active.get());
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let (buttons, cards) = page();
        let mut selection = CategorySelection::new();

        assert_eq!(select_button(&mut selection, &buttons, &cards, 7), None);
        assert!(selection.active().is_none());
    }

    #[test]
    fn test_visibility_rule() {
        let a = CategoryId::from("a");
        assert_eq!(visibility_for(&a, &a), Visibility::Shown);
        assert_eq!(visibility_for(&a, &CategoryId::from("b")), Visibility::Hidden);
    }

    #[test]
    fn test_initial_selection_filters_by_marked_button() {
        let buttons = vec![
            FakeButton::new("writing", false),
            FakeButton::new("coding", false),
            FakeButton::new("images", true),
        ];
        let (_, cards) = page();

        let selection = initial_selection(&buttons, &cards);

        assert_eq!(selection.active_category(), Some(&CategoryId::from("images")));
        assert_eq!(
            visibilities(&cards),
            vec![
                Some(Visibility::Hidden),
                Some(Visibility::Hidden),
                Some(Visibility::Hidden),
                Some(Visibility::Shown),
            ]
        );
    }

    #[test]
    fn test_initial_selection_keeps_first_of_several_marked() {
        let buttons = vec![
            FakeButton::new("writing", false),
            FakeButton::new("coding", true),
            FakeButton::new("images", true),
        ];
        let (_, cards) = page();

        let selection = initial_selection(&buttons, &cards);

        assert!(selection.is_active(1));
        let active: Vec<bool> = buttons.iter().map(|b| b.active.get()).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_initial_selection_without_marked_button_touches_nothing() {
        let buttons = vec![FakeButton::new("writing", false), FakeButton::new("coding", false)];
        let (_, cards) = page();

        let selection = initial_selection(&buttons, &cards);

        assert!(selection.active().is_none());
        assert!(buttons.iter().all(|b| !b.active.get()));
        assert!(cards.iter().all(|c| c.visibility.get().is_none()));
    }
}
