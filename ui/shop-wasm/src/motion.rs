//! Scroll-driven animation on the landing page.
//!
//! Two scenes: the page scene (hero, today's special, navbar) lives as long
//! as the page; the category scene (floating decorations, dish entrance) is
//! torn down and rebuilt on every category switch. Tearing down drops its
//! scroll listener and reverts every inline style it wrote.

use crate::dom;
use hb_shop_core::motion::{
    self, CHOPSTICKS_SPIN_MS, Category, DISH_ENTRANCE, Entrance, HERO_INTRO, HERO_INTRO_FROM,
    NavbarPosition, SPECIAL_CARD_FROM, SPECIAL_ENTRANCE, SPECIAL_SPIN_RANGE, ScrollDirection,
    ScrollGeometry, ScrollRange, ScrollTween,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

const SPIN_KEYFRAMES: &str = "@keyframes hb-spin { to { transform: rotate(360deg); } }";

thread_local! {
    static PAGE_SCENE: RefCell<Option<Scene>> = const { RefCell::new(None) };
    static CATEGORY_SCENE: RefCell<Option<Scene>> = const { RefCell::new(None) };
}

// ── Scene parts ──

struct BoundTween {
    el: Element,
    trigger: Element,
    tween: ScrollTween,
}

struct EntranceGroup {
    trigger: Element,
    targets: Vec<Element>,
    entrance: Entrance,
    fade: bool,
    played: bool,
}

struct Spinner {
    el: Element,
    trigger: Element,
    range: ScrollRange,
}

#[derive(Default)]
struct SceneParts {
    tweens: Vec<BoundTween>,
    entrances: Vec<EntranceGroup>,
    spinners: Vec<Spinner>,
    navbar: Option<Element>,
    last_scroll: f64,
}

fn geometry(trigger: &Element, scroll_y: f64, viewport_height: f64) -> ScrollGeometry {
    let rect = trigger.get_bounding_client_rect();
    ScrollGeometry {
        scroll_y,
        viewport_height,
        element_top: rect.top() + scroll_y,
        element_height: rect.height(),
    }
}

impl SceneParts {
    fn update(&mut self) {
        let window = dom::window();
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let viewport = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        for bound in &self.tweens {
            let transform = bound.tween.sample(geometry(&bound.trigger, scroll_y, viewport));
            dom::set_style(&bound.el, "transform", &transform.css());
        }

        for group in self.entrances.iter_mut().filter(|g| !g.played) {
            let top = group.trigger.get_bounding_client_rect().top();
            if group.entrance.triggered(top, viewport) {
                play(group);
            }
        }

        for spinner in &self.spinners {
            let running = spinner
                .range
                .contains(geometry(&spinner.trigger, scroll_y, viewport));
            let state = if running { "running" } else { "paused" };
            dom::set_style(&spinner.el, "animation-play-state", state);
        }

        if let Some(navbar) = &self.navbar {
            let direction = if scroll_y >= self.last_scroll {
                ScrollDirection::Down
            } else {
                ScrollDirection::Up
            };
            if scroll_y != self.last_scroll {
                if let Some(position) = motion::navbar_position(direction, scroll_y) {
                    set_navbar(navbar, position);
                }
            }
        }
        self.last_scroll = scroll_y;
    }

    /// Undo every inline style this scene wrote.
    fn revert(&self) {
        let clear = |el: &Element| {
            for property in ["transform", "transition", "opacity", "animation", "animation-play-state"] {
                dom::set_style(el, property, "");
            }
        };
        self.tweens.iter().for_each(|b| clear(&b.el));
        self.entrances
            .iter()
            .flat_map(|g| g.targets.iter())
            .for_each(clear);
        self.spinners.iter().for_each(|s| clear(&s.el));
        if let Some(navbar) = &self.navbar {
            clear(navbar);
        }
    }
}

fn set_navbar(navbar: &Element, position: NavbarPosition) {
    dom::set_style(navbar, "transition", "transform 0.3s");
    dom::set_style(
        navbar,
        "transform",
        &format!("translateY({}px)", position.offset_px()),
    );
}

fn prepare(group: &EntranceGroup, from: &[String]) {
    for (el, css) in group.targets.iter().zip(from) {
        dom::set_style(el, "transform", css);
        if group.fade {
            dom::set_style(el, "opacity", "0");
        }
    }
}

fn play(group: &mut EntranceGroup) {
    for (i, el) in group.targets.iter().enumerate() {
        let delay = group.entrance.delay_ms(i);
        let duration = group.entrance.duration_ms;
        dom::set_style(
            el,
            "transition",
            &format!(
                "transform {duration}ms ease-out {delay}ms, opacity {duration}ms ease-out {delay}ms"
            ),
        );
        dom::set_style(el, "transform", "none");
        if group.fade {
            dom::set_style(el, "opacity", "1");
        }
    }
    group.played = true;
}

// ── Scene with its listener ──

/// Scroll listener removed from the window on drop.
struct ScrollListener {
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ScrollListener {
    fn new(mut on_scroll: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(move |_: web_sys::Event| on_scroll())
            as Box<dyn FnMut(web_sys::Event)>);
        dom::window()
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { closure })
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        let _ = dom::window()
            .remove_event_listener_with_callback("scroll", self.closure.as_ref().unchecked_ref());
    }
}

struct Scene {
    parts: Rc<RefCell<SceneParts>>,
    _listener: Option<ScrollListener>,
}

impl Scene {
    fn start(parts: SceneParts) -> Self {
        let parts = Rc::new(RefCell::new(parts));
        let on_scroll = parts.clone();
        let listener = ScrollListener::new(move || on_scroll.borrow_mut().update());
        parts.borrow_mut().update();
        Self {
            parts,
            _listener: listener,
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.parts.borrow().revert();
    }
}

fn bind_tweens(tweens: Vec<ScrollTween>) -> Vec<BoundTween> {
    tweens
        .into_iter()
        .filter_map(|tween| {
            let trigger = dom::query(tween.trigger)?;
            let els = dom::query_all(tween.selector);
            Some(
                els.into_iter()
                    .map(|el| BoundTween {
                        el,
                        trigger: trigger.clone(),
                        tween: tween.clone(),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .flatten()
        .collect()
}

fn entrance_group(
    trigger: Element,
    targets: Vec<Element>,
    entrance: Entrance,
    from: Vec<String>,
    fade: bool,
) -> EntranceGroup {
    let group = EntranceGroup {
        trigger,
        targets,
        entrance,
        fade,
        played: false,
    };
    prepare(&group, &from);
    group
}

fn inject_keyframes() {
    let Some(head) = dom::document().head() else {
        return;
    };
    if dom::by_id("hb-motion-keyframes").is_some() {
        return;
    }
    if let Some(style) = dom::create_element("style") {
        dom::set_attr(&style, "id", "hb-motion-keyframes");
        dom::set_text(&style, SPIN_KEYFRAMES);
        let _ = head.append_child(&style);
    }
}

// ── Public entry points ──

/// Hero parallax, today's special and the auto-hiding navbar.
pub fn start_page_scene(navbar: Option<Element>) {
    inject_keyframes();

    let mut parts = SceneParts {
        tweens: bind_tweens(
            motion::hero_tweens()
                .into_iter()
                .chain(motion::special_tweens())
                .collect(),
        ),
        navbar,
        ..SceneParts::default()
    };

    if let Some(hero) = dom::query(".hero-content") {
        let targets = dom::query_all(".hero-content > *");
        let from = vec![HERO_INTRO_FROM.css(); targets.len()];
        parts
            .entrances
            .push(entrance_group(hero, targets, HERO_INTRO, from, true));
    }

    if let Some(special) = dom::query(".todays-special") {
        let targets = dom::query_all(".todays-special .dish-card");
        let from = vec![format!("{} scale(0.9)", SPECIAL_CARD_FROM.css()); targets.len()];
        parts.entrances.push(entrance_group(
            special.clone(),
            targets,
            SPECIAL_ENTRANCE,
            from,
            true,
        ));

        for el in dom::query_all(".chopsticks-float") {
            dom::set_style(
                &el,
                "animation",
                &format!("hb-spin {CHOPSTICKS_SPIN_MS}ms linear infinite"),
            );
            parts.spinners.push(Spinner {
                el,
                trigger: special.clone(),
                range: SPECIAL_SPIN_RANGE,
            });
        }
    }

    let scene = Scene::start(parts);
    PAGE_SCENE.with(|s| *s.borrow_mut() = Some(scene));
}

/// Replace the category scene with one for `category`.
pub fn start_category_scene(category: Category) {
    // Drop the old scene first so its reverted styles do not clobber the
    // new starting poses.
    CATEGORY_SCENE.with(|s| s.borrow_mut().take());

    let mut parts = SceneParts {
        tweens: bind_tweens(motion::volatile_tweens(category)),
        ..SceneParts::default()
    };

    if let Some(showcase) = dom::query(".menu-showcase") {
        let targets = dom::query_all(".active-category .dish-card, .active-category .menu-card");
        let from = (0..targets.len())
            .map(|i| motion::dish_entrance_from(i).css())
            .collect();
        parts.entrances.push(entrance_group(
            showcase,
            targets,
            DISH_ENTRANCE,
            from,
            false,
        ));
    }

    let scene = Scene::start(parts);
    CATEGORY_SCENE.with(|s| *s.borrow_mut() = Some(scene));
}
