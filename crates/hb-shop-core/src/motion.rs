//! Menu categories and scroll-linked animation model.
//!
//! Everything here is declarative: which elements move, how far, and over
//! which stretch of scrolling. The browser layer samples these tweens on
//! scroll and writes the resulting CSS transforms.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Main,
    Juices,
    Dessert,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Main, Category::Juices, Category::Dessert];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "main" => Some(Self::Main),
            "juices" => Some(Self::Juices),
            "dessert" => Some(Self::Dessert),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Juices => "juices",
            Self::Dessert => "dessert",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the active menu category. Starts with none so the first switch
/// (page load) always applies.
#[derive(Debug, Default)]
pub struct CategorySwitcher {
    current: Option<Category>,
}

impl CategorySwitcher {
    pub fn current(&self) -> Option<Category> {
        self.current
    }

    /// `None` when `target` is already active.
    pub fn switch(&mut self, target: Category) -> Option<CategoryTransition> {
        if self.current == Some(target) {
            return None;
        }
        self.current = Some(target);
        Some(CategoryTransition { active: target })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTransition {
    pub active: Category,
}

impl CategoryTransition {
    /// Whether an element tagged `data-category=<attr>` should be shown.
    pub fn is_visible(&self, category_attr: &str) -> bool {
        category_attr == self.active.as_str()
    }

    pub fn volatile_tweens(&self) -> Vec<ScrollTween> {
        volatile_tweens(self.active)
    }
}

// ── Transforms ──

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
    };

    pub const fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    /// Linear blend from identity (`t = 0`) to `self` (`t = 1`).
    pub fn scaled(self, t: f64) -> Self {
        Self {
            x: self.x * t,
            y: self.y * t,
            rotation: self.rotation * t,
        }
    }

    pub fn css(self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            round2(self.x),
            round2(self.y),
            round2(self.rotation)
        )
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ── Scroll ranges ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// "element edge meets this fraction of the viewport" (0 = top, 1 = bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub element: Edge,
    pub viewport: f64,
}

/// Layout numbers needed to place a trigger element against the scroll
/// position, all in CSS pixels and document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub element_top: f64,
    pub element_height: f64,
}

impl ScrollGeometry {
    fn scroll_at(&self, marker: Marker) -> f64 {
        let edge = match marker.element {
            Edge::Top => self.element_top,
            Edge::Bottom => self.element_top + self.element_height,
        };
        edge - self.viewport_height * marker.viewport
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: Marker,
    pub end: Marker,
}

impl ScrollRange {
    /// From the element entering at the bottom until it leaves at the top.
    pub const ENTER_TO_EXIT: ScrollRange = ScrollRange {
        start: Marker {
            element: Edge::Top,
            viewport: 1.0,
        },
        end: Marker {
            element: Edge::Bottom,
            viewport: 0.0,
        },
    };

    /// From the element's top at the viewport top until its bottom passes it.
    pub const PINNED_TO_EXIT: ScrollRange = ScrollRange {
        start: Marker {
            element: Edge::Top,
            viewport: 0.0,
        },
        end: Marker {
            element: Edge::Bottom,
            viewport: 0.0,
        },
    };

    /// Whether the scroll position lies inside the range.
    pub fn contains(&self, geometry: ScrollGeometry) -> bool {
        let start = geometry.scroll_at(self.start);
        let end = geometry.scroll_at(self.end);
        geometry.scroll_y >= start && geometry.scroll_y <= end
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self, geometry: ScrollGeometry) -> f64 {
        let start = geometry.scroll_at(self.start);
        let end = geometry.scroll_at(self.end);
        if end <= start {
            return if geometry.scroll_y >= end { 1.0 } else { 0.0 };
        }
        ((geometry.scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }
}

/// A transform scrubbed by scroll position over a range of a trigger element.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTween {
    pub selector: &'static str,
    pub trigger: &'static str,
    pub to: Transform,
    pub range: ScrollRange,
}

impl ScrollTween {
    pub fn sample(&self, geometry: ScrollGeometry) -> Transform {
        self.to.scaled(self.range.progress(geometry))
    }
}

const HERO: &str = ".hero-section";
const SHOWCASE: &str = ".menu-showcase";
const SPECIAL: &str = ".todays-special";

pub fn hero_tweens() -> Vec<ScrollTween> {
    let tween = |selector, to| ScrollTween {
        selector,
        trigger: HERO,
        to,
        range: ScrollRange::PINNED_TO_EXIT,
    };
    vec![
        tween(".main-dish-image", Transform::new(0.0, -80.0, 5.0)),
        tween(".spoon", Transform::new(50.0, 100.0, -15.0)),
        tween(".deco-top-left-container", Transform::new(-100.0, -300.0, -20.0)),
    ]
}

/// Floating decorations that belong to one category.
pub fn volatile_tweens(category: Category) -> Vec<ScrollTween> {
    let pairs: [(&'static str, Transform); 2] = match category {
        Category::Main => [
            (".deco-lobster", Transform::new(0.0, 200.0, 20.0)),
            (".deco-peas", Transform::new(0.0, -150.0, -30.0)),
        ],
        Category::Juices => [
            (".deco-lemon-juice", Transform::new(0.0, 100.0, 10.0)),
            (".deco-mint-juice", Transform::new(0.0, -80.0, -15.0)),
        ],
        Category::Dessert => [
            (".deco-almond-dessert", Transform::new(0.0, 120.0, 20.0)),
            (".deco-coconut-dessert", Transform::new(0.0, -100.0, -25.0)),
        ],
    };
    pairs
        .into_iter()
        .map(|(selector, to)| ScrollTween {
            selector,
            trigger: SHOWCASE,
            to,
            range: ScrollRange::ENTER_TO_EXIT,
        })
        .collect()
}

pub fn special_tweens() -> Vec<ScrollTween> {
    vec![ScrollTween {
        selector: ".chopsticks-float",
        trigger: SPECIAL,
        to: Transform::new(0.0, -20.0, 0.0),
        range: ScrollRange::ENTER_TO_EXIT,
    }]
}

// ── Entrance animations ──

/// One-shot "slide up into place" played when a section scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    /// Viewport fraction the trigger's top must pass (0.85 = "top 85%").
    pub viewport_threshold: f64,
    pub duration_ms: u32,
    pub stagger_ms: u32,
}

pub const DISH_ENTRANCE: Entrance = Entrance {
    viewport_threshold: 0.85,
    duration_ms: 1200,
    stagger_ms: 200,
};

pub const SPECIAL_ENTRANCE: Entrance = Entrance {
    viewport_threshold: 0.85,
    duration_ms: 1200,
    stagger_ms: 0,
};

/// Hero copy fades up right after load.
pub const HERO_INTRO: Entrance = Entrance {
    viewport_threshold: 1.0,
    duration_ms: 800,
    stagger_ms: 200,
};

pub const HERO_INTRO_FROM: Transform = Transform::new(0.0, 20.0, 0.0);

/// The special card also starts transparent and at 90 % scale.
pub const SPECIAL_CARD_FROM: Transform = Transform::new(0.0, 100.0, 0.0);

/// The chopsticks spin (one turn per period) while the special section is
/// between "top 85%" and "bottom top".
pub const CHOPSTICKS_SPIN_MS: u32 = 3000;

pub const SPECIAL_SPIN_RANGE: ScrollRange = ScrollRange {
    start: Marker {
        element: Edge::Top,
        viewport: 0.85,
    },
    end: Marker {
        element: Edge::Bottom,
        viewport: 0.0,
    },
};

impl Entrance {
    pub fn triggered(&self, trigger_top_in_viewport: f64, viewport_height: f64) -> bool {
        trigger_top_in_viewport <= viewport_height * self.viewport_threshold
    }

    pub fn delay_ms(&self, index: usize) -> u32 {
        self.stagger_ms.saturating_mul(index as u32)
    }
}

/// Starting pose of the n-th dish card: below its slot, tilted alternately.
pub fn dish_entrance_from(index: usize) -> Transform {
    let rotation = if index % 2 == 0 { 5.0 } else { -5.0 };
    Transform::new(0.0, 100.0, rotation)
}

// ── Navbar ──

/// Scroll distance the navbar trigger spans.
pub const NAVBAR_SCROLL_END: f64 = 99_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarPosition {
    Shown,
    Hidden,
}

impl NavbarPosition {
    pub fn offset_px(self) -> f64 {
        match self {
            Self::Shown => 0.0,
            Self::Hidden => -100.0,
        }
    }
}

/// Hide when scrolling down past 5 % of the trigger, show on any scroll up.
pub fn navbar_position(direction: ScrollDirection, scroll_y: f64) -> Option<NavbarPosition> {
    let progress = (scroll_y / NAVBAR_SCROLL_END).clamp(0.0, 1.0);
    match direction {
        ScrollDirection::Down if progress > 0.05 => Some(NavbarPosition::Hidden),
        ScrollDirection::Down => None,
        ScrollDirection::Up => Some(NavbarPosition::Shown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(scroll_y: f64) -> ScrollGeometry {
        ScrollGeometry {
            scroll_y,
            viewport_height: 800.0,
            element_top: 1000.0,
            element_height: 400.0,
        }
    }

    #[test]
    fn first_switch_applies_and_repeats_are_ignored() {
        let mut switcher = CategorySwitcher::default();
        let first = switcher.switch(Category::Main).expect("initial switch");
        assert!(first.is_visible("main"));
        assert!(!first.is_visible("juices"));

        assert!(switcher.switch(Category::Main).is_none());
        let next = switcher.switch(Category::Dessert).unwrap();
        assert_eq!(next.volatile_tweens()[0].selector, ".deco-almond-dessert");
        assert_eq!(switcher.current(), Some(Category::Dessert));
    }

    #[test]
    fn enter_to_exit_progress() {
        let range = ScrollRange::ENTER_TO_EXIT;
        // starts at 1000 - 800 = 200, ends at 1400
        assert_eq!(range.progress(geometry(0.0)), 0.0);
        assert_eq!(range.progress(geometry(200.0)), 0.0);
        assert_eq!(range.progress(geometry(800.0)), 0.5);
        assert_eq!(range.progress(geometry(5000.0)), 1.0);
    }

    #[test]
    fn spin_range_covers_visible_section() {
        // starts at 1000 - 680 = 320, ends at 1400
        assert!(!SPECIAL_SPIN_RANGE.contains(geometry(319.0)));
        assert!(SPECIAL_SPIN_RANGE.contains(geometry(321.0)));
        assert!(SPECIAL_SPIN_RANGE.contains(geometry(1399.0)));
        assert!(!SPECIAL_SPIN_RANGE.contains(geometry(1401.0)));
    }

    #[test]
    fn tween_sample_scales_target() {
        let tween = &volatile_tweens(Category::Main)[0];
        let halfway = tween.sample(geometry(800.0));
        assert_eq!(halfway, Transform::new(0.0, 100.0, 10.0));
        assert_eq!(halfway.css(), "translate(0px, 100px) rotate(10deg)");
    }

    #[test]
    fn dish_cards_alternate_tilt() {
        assert_eq!(dish_entrance_from(0).rotation, 5.0);
        assert_eq!(dish_entrance_from(1).rotation, -5.0);
        assert_eq!(DISH_ENTRANCE.delay_ms(3), 600);
        assert!(DISH_ENTRANCE.triggered(600.0, 800.0));
        assert!(!DISH_ENTRANCE.triggered(700.0, 800.0));
    }

    #[test]
    fn navbar_hides_on_scroll_down_only_past_threshold() {
        assert_eq!(navbar_position(ScrollDirection::Down, 100.0), None);
        assert_eq!(
            navbar_position(ScrollDirection::Down, 6_000.0),
            Some(NavbarPosition::Hidden)
        );
        assert_eq!(
            navbar_position(ScrollDirection::Up, 6_000.0),
            Some(NavbarPosition::Shown)
        );
    }
}
