// src/settings.rs

use druid::widget::{Button, Flex, Label, LineBreaking, Slider};
use druid::{EventCtx, LensExt, Point, Size, Widget, WidgetExt, WindowDesc};
use log::info;

use crate::AppState;
use crate::brightness::BrightnessLevel;
use crate::config::MaskDefaults;
use crate::overlay::{preview_window, selection_window};

pub fn settings_window() -> WindowDesc<AppState> {
    let (x, y) = MaskDefaults::SETTINGS_POSITION;
    let (w, h) = MaskDefaults::SETTINGS_SIZE;
    WindowDesc::new(build_settings())
        .title(MaskDefaults::SETTINGS_TITLE)
        .set_position(Point::new(x, y))
        .window_size(Size::new(w, h))
}

fn build_settings() -> impl Widget<AppState> {
    let hint = Label::new(MaskDefaults::HINT_TEXT).with_line_break_mode(LineBreaking::WordWrap);
    let value = Label::dynamic(|data: &AppState, _| format!("Brightness: {}", data.brightness.get()));

    // every change lands in the shared state right away
    let slider = Slider::new()
        .with_range(
            MaskDefaults::BRIGHTNESS_MIN as f64,
            MaskDefaults::BRIGHTNESS_MAX as f64,
        )
        .lens(AppState::brightness.map(
            |b: &BrightnessLevel| b.as_slider(),
            |b: &mut BrightnessLevel, v: f64| *b = BrightnessLevel::from_slider(v),
        ))
        .expand_width();

    let preview = Button::new("Preview").on_click(|ctx, data: &mut AppState, _| open_preview(ctx, data));
    let confirm = Button::new("Confirm").on_click(|ctx, data: &mut AppState, _| start_selection(ctx, data));

    Flex::column()
        .with_child(hint)
        .with_spacer(12.0)
        .with_child(value)
        .with_child(slider)
        .with_flex_spacer(1.0)
        .with_child(
            Flex::row()
                .with_flex_child(preview.expand_width(), 1.0)
                .with_spacer(8.0)
                .with_flex_child(confirm.expand_width(), 1.0),
        )
        .padding(16.0)
}

fn open_preview(ctx: &mut EventCtx, data: &AppState) {
    info!("Opening preview at brightness {}", data.brightness.get());
    ctx.new_window(preview_window(data.brightness.get()));
}

fn start_selection(ctx: &mut EventCtx, data: &AppState) {
    info!("Entering selection mode at brightness {}", data.brightness.get());
    ctx.new_window(selection_window());
    ctx.window().hide();
}
