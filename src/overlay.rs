// src/overlay.rs
//
// Full-screen overlays: the throwaway brightness preview and the selection
// mask. Both sit above everything, frameless, on a transparent surface.

use druid::{
    BoxConstraints, Data, Env, Event, EventCtx, KbKey, LayoutCtx, LifeCycle, LifeCycleCtx,
    Modifiers, PaintCtx, Point, Rect, Screen, Size, UpdateCtx, Widget, WindowDesc, WindowHandle,
    commands,
};
use log::{debug, info};

use crate::AppState;
use crate::brightness::WheelDirection;
use crate::mask::{paint_preview, paint_selection};
use crate::prompt::{DialogPrompt, Prompt};
use crate::selection_logic::{
    Direction, Reaction, ScreenPoint, SelectionInput, SelectionRect, SelectionState,
};

/// First monitor flagged primary, `fallback` if none is.
fn primary_rect(monitors: impl IntoIterator<Item = (bool, Rect)>, fallback: Rect) -> Rect {
    monitors
        .into_iter()
        .find(|(primary, _)| *primary)
        .map(|(_, rect)| rect)
        .unwrap_or(fallback)
}

fn primary_display_rect() -> Rect {
    let monitors = Screen::get_monitors();
    primary_rect(
        monitors.iter().map(|m| (m.is_primary(), m.virtual_rect())),
        Screen::get_display_rect(),
    )
}

fn overlay_window<W: Widget<AppState> + 'static>(widget: W, title: &'static str) -> WindowDesc<AppState> {
    let screen = primary_display_rect();
    WindowDesc::new(widget)
        .title(title)
        .show_titlebar(false)
        .transparent(true)
        .resizable(false)
        .set_always_on_top(true)
        .set_position(screen.origin())
        .window_size(screen.size())
}

/// The preview keeps the alpha it was opened with; later slider moves do not
/// reach it.
pub fn preview_window(alpha: u8) -> WindowDesc<AppState> {
    overlay_window(PreviewOverlay { alpha }, "Mask preview")
}

pub fn selection_window() -> WindowDesc<AppState> {
    overlay_window(SelectionOverlay::new(DialogPrompt), "Mask")
}

/// Ctrl on its own; Shift/Alt/Meta held alongside disqualifies the chord.
fn ctrl_only(mods: Modifiers) -> bool {
    mods.ctrl() && !mods.shift() && !mods.alt() && !mods.meta()
}

fn to_screen_point(pos: Point) -> ScreenPoint {
    ScreenPoint::new(pos.x.round() as i32, pos.y.round() as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    Nudge(Direction),
    Close,
}

fn shortcut(key: &KbKey, mods: Modifiers) -> Option<Shortcut> {
    if !ctrl_only(mods) {
        return None;
    }
    match key {
        KbKey::ArrowUp => Some(Shortcut::Nudge(Direction::Up)),
        KbKey::ArrowDown => Some(Shortcut::Nudge(Direction::Down)),
        KbKey::ArrowLeft => Some(Shortcut::Nudge(Direction::Left)),
        KbKey::ArrowRight => Some(Shortcut::Nudge(Direction::Right)),
        KbKey::Character(c) if c.eq_ignore_ascii_case("c") => Some(Shortcut::Close),
        // some platforms hand over ETX instead of the letter
        KbKey::Character(c) if c == "\u{3}" => Some(Shortcut::Close),
        _ => None,
    }
}

/// Z-order control over the overlay window.
trait Stacking {
    fn set_on_top(&self, on_top: bool);
}

impl Stacking for WindowHandle {
    fn set_on_top(&self, on_top: bool) {
        self.set_always_on_top(on_top);
    }
}

/// The dialogs have no owner window, so the topmost overlay would cover them.
/// It drops out of the topmost band while `ask` runs.
fn beneath_dialog<S: Stacking + ?Sized, R>(overlay: &S, ask: impl FnOnce() -> R) -> R {
    overlay.set_on_top(false);
    let answer = ask();
    overlay.set_on_top(true);
    answer
}

/// Feeds the prompt's answer for a released drag back into the state machine.
/// The prompt blocks until the user answers.
fn settle<P: Prompt, S: Stacking + ?Sized>(
    state: &mut SelectionState,
    prompt: &P,
    overlay: &S,
    rect: SelectionRect,
) {
    let yes = beneath_dialog(overlay, || prompt.confirm_selection(rect));
    state.handle(SelectionInput::Answer(yes));
}

/// Close guard: warns and returns `false` unless the region is confirmed.
fn guard_close<P: Prompt, S: Stacking + ?Sized>(state: &mut SelectionState, prompt: &P, overlay: &S) -> bool {
    match state.handle(SelectionInput::CloseRequested) {
        Reaction::AllowClose => true,
        _ => {
            beneath_dialog(overlay, || prompt.warn_unconfirmed());
            false
        }
    }
}

pub struct PreviewOverlay {
    alpha: u8,
}

impl Widget<AppState> for PreviewOverlay {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut AppState, _env: &Env) {
        if let Event::MouseDown(e) = event {
            if e.button.is_left() {
                debug!("Preview dismissed");
                ctx.submit_command(commands::CLOSE_WINDOW.to(ctx.window_id()));
                ctx.set_handled();
            }
        }
    }

    fn lifecycle(&mut self, _ctx: &mut LifeCycleCtx, _event: &LifeCycle, _data: &AppState, _env: &Env) {}

    fn update(&mut self, _ctx: &mut UpdateCtx, _old: &AppState, _data: &AppState, _env: &Env) {}

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &AppState, _env: &Env) {
        paint_preview(ctx, self.alpha);
    }
}

/// Owns the selection state; the brightness lives in [`AppState`] and is
/// shared with the settings window.
pub struct SelectionOverlay<P> {
    state: SelectionState,
    prompt: P,
}

impl<P: Prompt> SelectionOverlay<P> {
    pub fn new(prompt: P) -> Self {
        Self { state: SelectionState::new(), prompt }
    }

    fn apply(&mut self, ctx: &mut EventCtx, input: SelectionInput) {
        match self.state.handle(input) {
            Reaction::Unchanged => {}
            Reaction::Redraw => ctx.request_paint(),
            Reaction::AskConfirmation(rect) => {
                settle(&mut self.state, &self.prompt, ctx.window(), rect);
                ctx.request_paint();
            }
            // only CloseRequested produces these, see guard_close
            Reaction::VetoClose | Reaction::AllowClose => {}
        }
    }
}

impl<P: Prompt> Widget<AppState> for SelectionOverlay<P> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => ctx.request_focus(),

            Event::MouseDown(e) if e.button.is_left() => {
                ctx.set_active(true);
                self.apply(ctx, SelectionInput::Press(to_screen_point(e.pos)));
            }

            Event::MouseMove(e) => {
                self.apply(ctx, SelectionInput::Move(to_screen_point(e.pos)));
            }

            Event::MouseUp(e) if e.button.is_left() => {
                ctx.set_active(false);
                self.apply(ctx, SelectionInput::Release);
            }

            Event::Wheel(e) if ctrl_only(e.mods) => {
                if let Some(direction) = WheelDirection::from_delta_y(e.wheel_delta.y) {
                    data.brightness = data.brightness.step(direction);
                    debug!("Brightness now {}", data.brightness.get());
                    ctx.request_paint();
                }
                ctx.set_handled();
            }

            Event::KeyDown(k) => match shortcut(&k.key, k.mods) {
                Some(Shortcut::Nudge(direction)) => {
                    self.apply(ctx, SelectionInput::Nudge(direction));
                    ctx.set_handled();
                }
                Some(Shortcut::Close) => {
                    // goes through WindowCloseRequested, so the guard below still applies
                    ctx.submit_command(commands::CLOSE_WINDOW.to(ctx.window_id()));
                    ctx.set_handled();
                }
                None => {}
            },

            Event::WindowCloseRequested => {
                if guard_close(&mut self.state, &self.prompt, ctx.window()) {
                    info!("Mask closed with region {:?}", self.state.rect());
                    // the settings window is only hidden, so take the whole app down
                    ctx.submit_command(commands::QUIT_APP);
                } else {
                    // handling the request keeps the window open
                    ctx.set_handled();
                }
            }

            _ => {}
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, _data: &AppState, _env: &Env) {
        if let LifeCycle::WidgetAdded = event {
            ctx.register_for_focus();
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old: &AppState, data: &AppState, _env: &Env) {
        if !old.same(data) {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &AppState, _env: &Env) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        paint_selection(ctx, &self.state, data.brightness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeOverlay {
        on_top: Cell<bool>,
    }

    impl FakeOverlay {
        fn topmost() -> Self {
            Self { on_top: Cell::new(true) }
        }
    }

    impl Stacking for FakeOverlay {
        fn set_on_top(&self, on_top: bool) {
            self.on_top.set(on_top);
        }
    }

    /// Answers from a script and notes whether the overlay was still topmost
    /// each time a dialog went up.
    struct ScriptedPrompt<'a> {
        overlay: &'a FakeOverlay,
        answers: RefCell<Vec<bool>>,
        asked: RefCell<Vec<SelectionRect>>,
        warnings: Cell<usize>,
        shown_over_topmost: Cell<usize>,
    }

    impl<'a> ScriptedPrompt<'a> {
        fn answering(overlay: &'a FakeOverlay, answers: &[bool]) -> Self {
            Self {
                overlay,
                answers: RefCell::new(answers.iter().rev().copied().collect()),
                asked: RefCell::new(Vec::new()),
                warnings: Cell::new(0),
                shown_over_topmost: Cell::new(0),
            }
        }

        fn shown(&self) {
            if self.overlay.on_top.get() {
                self.shown_over_topmost.set(self.shown_over_topmost.get() + 1);
            }
        }
    }

    impl Prompt for ScriptedPrompt<'_> {
        fn confirm_selection(&self, rect: SelectionRect) -> bool {
            self.shown();
            self.asked.borrow_mut().push(rect);
            self.answers.borrow_mut().pop().unwrap_or(false)
        }

        fn warn_unconfirmed(&self) {
            self.shown();
            self.warnings.set(self.warnings.get() + 1);
        }
    }

    fn release_drag(state: &mut SelectionState, prompt: &ScriptedPrompt, from: ScreenPoint, to: ScreenPoint) {
        state.handle(SelectionInput::Press(from));
        state.handle(SelectionInput::Move(to));
        if let Reaction::AskConfirmation(rect) = state.handle(SelectionInput::Release) {
            settle(state, prompt, prompt.overlay, rect);
        }
    }

    #[test]
    fn only_yes_confirms_a_released_drag() {
        let overlay = FakeOverlay::topmost();
        let prompt = ScriptedPrompt::answering(&overlay, &[false, true]);
        let mut state = SelectionState::new();

        release_drag(&mut state, &prompt, ScreenPoint::new(10, 10), ScreenPoint::new(40, 30));
        assert_eq!(state, SelectionState::Idle);

        release_drag(&mut state, &prompt, ScreenPoint::new(50, 50), ScreenPoint::new(250, 200));
        assert_eq!(
            state,
            SelectionState::Confirmed { rect: SelectionRect::new(50, 50, 200, 150) }
        );
        assert_eq!(
            *prompt.asked.borrow(),
            vec![SelectionRect::new(10, 10, 30, 20), SelectionRect::new(50, 50, 200, 150)]
        );
        assert_eq!(prompt.warnings.get(), 0);
    }

    fn chr(s: &str) -> KbKey {
        KbKey::Character(s.to_string())
    }

    #[test]
    fn closing_early_warns_and_keeps_the_window() {
        let overlay = FakeOverlay::topmost();
        let prompt = ScriptedPrompt::answering(&overlay, &[true]);
        let mut state = SelectionState::new();

        assert!(!guard_close(&mut state, &prompt, &overlay));
        state.handle(SelectionInput::Press(ScreenPoint::new(5, 5)));
        assert!(!guard_close(&mut state, &prompt, &overlay));
        assert_eq!(prompt.warnings.get(), 2);

        state.handle(SelectionInput::Move(ScreenPoint::new(25, 25)));
        if let Reaction::AskConfirmation(rect) = state.handle(SelectionInput::Release) {
            settle(&mut state, &prompt, &overlay, rect);
        }
        assert!(guard_close(&mut state, &prompt, &overlay));
        assert_eq!(prompt.warnings.get(), 2);
    }

    #[test]
    fn dialogs_open_with_the_overlay_out_of_the_topmost_band() {
        let overlay = FakeOverlay::topmost();
        let prompt = ScriptedPrompt::answering(&overlay, &[false, true]);
        let mut state = SelectionState::new();

        assert!(!guard_close(&mut state, &prompt, &overlay));
        assert!(overlay.on_top.get());
        release_drag(&mut state, &prompt, ScreenPoint::new(0, 0), ScreenPoint::new(8, 8));
        assert!(overlay.on_top.get());
        release_drag(&mut state, &prompt, ScreenPoint::new(0, 0), ScreenPoint::new(8, 8));
        assert!(overlay.on_top.get());

        assert_eq!(prompt.asked.borrow().len(), 2);
        assert_eq!(prompt.warnings.get(), 1);
        assert_eq!(prompt.shown_over_topmost.get(), 0);
    }

    #[test]
    fn allowed_close_leaves_the_stacking_alone() {
        let overlay = FakeOverlay::topmost();
        let prompt = ScriptedPrompt::answering(&overlay, &[]);
        let mut state = SelectionState::Confirmed { rect: SelectionRect::new(1, 1, 4, 4) };

        overlay.on_top.set(false);
        assert!(guard_close(&mut state, &prompt, &overlay));
        assert!(!overlay.on_top.get());
        assert_eq!(prompt.warnings.get(), 0);
    }

    #[test]
    fn ctrl_arrows_map_to_nudges() {
        let ctrl = Modifiers::CONTROL;
        assert_eq!(shortcut(&KbKey::ArrowUp, ctrl), Some(Shortcut::Nudge(Direction::Up)));
        assert_eq!(shortcut(&KbKey::ArrowDown, ctrl), Some(Shortcut::Nudge(Direction::Down)));
        assert_eq!(shortcut(&KbKey::ArrowLeft, ctrl), Some(Shortcut::Nudge(Direction::Left)));
        assert_eq!(shortcut(&KbKey::ArrowRight, ctrl), Some(Shortcut::Nudge(Direction::Right)));
    }

    #[test]
    fn ctrl_c_closes_whatever_the_key_text() {
        let ctrl = Modifiers::CONTROL;
        assert_eq!(shortcut(&chr("c"), ctrl), Some(Shortcut::Close));
        assert_eq!(shortcut(&chr("C"), ctrl), Some(Shortcut::Close));
        assert_eq!(shortcut(&chr("\u{3}"), ctrl), Some(Shortcut::Close));
    }

    #[test]
    fn close_follows_the_layout_not_the_key_position() {
        // Dvorak puts J where QWERTY has C
        assert_eq!(shortcut(&chr("j"), Modifiers::CONTROL), None);
        assert_eq!(shortcut(&chr("\u{a}"), Modifiers::CONTROL), None);
        assert_eq!(shortcut(&KbKey::Enter, Modifiers::CONTROL), None);
    }

    #[test]
    fn shortcuts_need_ctrl_alone() {
        assert_eq!(shortcut(&KbKey::ArrowUp, Modifiers::empty()), None);
        assert_eq!(shortcut(&chr("c"), Modifiers::empty()), None);
        assert_eq!(
            shortcut(&KbKey::ArrowUp, Modifiers::CONTROL | Modifiers::SHIFT),
            None
        );
        assert_eq!(shortcut(&chr("c"), Modifiers::CONTROL | Modifiers::ALT), None);
        assert_eq!(shortcut(&chr("x"), Modifiers::CONTROL), None);
    }

    #[test]
    fn lock_keys_do_not_break_the_ctrl_chord() {
        let mods = Modifiers::CONTROL | Modifiers::NUM_LOCK;
        assert_eq!(shortcut(&KbKey::ArrowLeft, mods), Some(Shortcut::Nudge(Direction::Left)));
    }

    #[test]
    fn overlay_covers_the_primary_monitor() {
        let all = Rect::new(-1920.0, 0.0, 2560.0, 1440.0);
        let left = Rect::new(-1920.0, 0.0, 0.0, 1080.0);
        let main = Rect::new(0.0, 0.0, 2560.0, 1440.0);
        assert_eq!(primary_rect([(false, left), (true, main)], all), main);
        assert_eq!(primary_rect([(false, left)], all), all);
        assert_eq!(primary_rect(Vec::new(), all), all);
    }

    #[test]
    fn positions_round_to_whole_pixels() {
        assert_eq!(to_screen_point(Point::new(10.4, 20.6)), ScreenPoint::new(10, 21));
        assert_eq!(to_screen_point(Point::new(-0.6, 0.0)), ScreenPoint::new(-1, 0));
    }
}
