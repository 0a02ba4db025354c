use std::time::Duration;

use eframe::egui;
use eframe::egui::{
    Align2, Color32, FontFamily, FontId, Id, Rect, Rounding, Sense, Stroke, TextStyle, Ui, Vec2,
    ViewportCommand, Visuals,
};
use eframe::epaint::Shadow;
use log::debug;
use tokio::{task, time};

use crate::chime;
use crate::clock::SystemClock;
use crate::controller::{ClockController, ControllerOptions};
use crate::digits::{card_text, DigitField};
use crate::host;
use crate::prefs::PreferenceStore;
use crate::schedule::LifecycleWatch;
use crate::settings::Settings;
use crate::shortcut::{self, ToggleRelay, ToggleSource};
use crate::surface::{DigitSurface, FlipBoard, FlipCard};

const CARD_SIZE: Vec2 = Vec2::new(100.0, 120.0);
const CARD_GAP: f32 = 14.0;
const CARD_ROUNDING: f32 = 10.0;
/// Below this apparent height the front face is too thin to carry text.
const MIN_TEXT_SCALE: f32 = 0.3;

const BACKGROUND: Color32 = Color32::from_rgb(18, 18, 20);
const CARD_BACK: Color32 = Color32::from_rgb(34, 34, 38);
const CARD_FACE: Color32 = Color32::from_rgb(44, 44, 50);
const CARD_SEAM: Color32 = Color32::from_rgb(12, 12, 14);
const DIGIT: Color32 = Color32::from_rgb(235, 235, 235);

/// How often the idle widget wakes up to poll the tick.
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

type Controller = ClockController<SystemClock, Box<dyn PreferenceStore>, FlipBoard>;

pub struct FlipClockApp {
    controller: Controller,
    relay: ToggleRelay,
    lifecycle: LifecycleWatch,
    chime: bool,
    /// Set once the window has been placed (or never needs placing).
    placed: bool,
}

impl FlipClockApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        prefs: Box<dyn PreferenceStore>,
    ) -> Self {
        cc.egui_ctx.set_visuals(Visuals::dark());

        let mut style = (*cc.egui_ctx.style()).clone();
        style.wrap = Some(false);
        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
        style
            .text_styles
            .insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
        cc.egui_ctx.set_style(style);

        let ctx = cc.egui_ctx.to_owned();
        task::spawn(async move {
            let mut interval = time::interval(REPAINT_INTERVAL);

            loop {
                interval.tick().await;
                ctx.request_repaint();
            }
        });

        let relay = ToggleRelay::new();
        if settings.signal_relay {
            shortcut::spawn_signal_relay(relay.sender(), cc.egui_ctx.to_owned());
        }

        let mut controller = ClockController::new(
            SystemClock,
            prefs,
            FlipBoard::default(),
            ControllerOptions {
                animate_now: settings.animate_now,
            },
        );
        controller.initialize();

        Self {
            controller,
            relay,
            lifecycle: LifecycleWatch::default(),
            chime: settings.chime,
            placed: settings.window.position().is_some(),
        }
    }

    fn toggle(&mut self, source: ToggleSource) {
        debug!("Toggle requested by {:?}", source);
        self.controller.toggle_mode();
    }

    /// Pins the window to the top-right corner once the monitor size is known.
    fn place_window(&mut self, ctx: &egui::Context, monitor_size: Option<Vec2>) {
        if self.placed || monitor_size.is_none() {
            return;
        }
        let position = host::top_right_position(monitor_size);
        debug!("Placing window at {:?}", position);
        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(position));
        self.placed = true;
    }
}

impl eframe::App for FlipClockApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (focused, minimized, monitor_size) = ctx.input(|i| {
            let viewport = i.viewport();
            (viewport.focused, viewport.minimized, viewport.monitor_size)
        });
        self.place_window(ctx, monitor_size);

        if self.lifecycle.observe(focused, minimized) {
            debug!("Window shown again, catching up");
            self.controller.tick();
        }
        for source in self.relay.pending() {
            self.toggle(source);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&shortcut::toggle_shortcut())) {
            self.toggle(ToggleSource::Shortcut);
        }

        if self.controller.on_frame() {
            ctx.request_repaint();
        }
        if self.controller.take_deadline_reached() && self.chime {
            chime::play_chime();
        }

        let mode = self.controller.mode();
        let board = self.controller.surface();
        let mut toggle_clicked = false;
        let mut close_clicked = false;

        let main_frame = egui::containers::Frame {
            fill: BACKGROUND,
            shadow: Shadow::NONE,
            inner_margin: egui::Margin::same(16.0),
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(main_frame)
            .show(ctx, |ui| {
                let app_rect = ui.max_rect();
                let response = ui.interact(app_rect, Id::new("app"), Sense::drag());
                if response.drag_started() {
                    ui.ctx().send_viewport_cmd(ViewportCommand::StartDrag);
                }

                let board_width = CARD_SIZE.x * 3.0 + CARD_GAP * 2.0;
                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = CARD_GAP;
                    ui.add_space(((ui.available_width() - board_width) / 2.0).max(0.0));
                    for field in DigitField::ALL {
                        if let Some(card) = board.card(field) {
                            paint_card(ui, card);
                        }
                    }
                });

                ui.add_space(24.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(mode.label())
                        .on_hover_text(mode.tooltip())
                        .clicked()
                    {
                        toggle_clicked = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("x").on_hover_text("Close").clicked() {
                            close_clicked = true;
                        }
                    });
                });
            });

        if toggle_clicked {
            self.toggle(ToggleSource::Button);
        }
        if close_clicked {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}

/// Draws one split-flap card. A running flip squashes the front face
/// vertically by the cosine of its rotation, revealing the back face behind.
fn paint_card(ui: &mut Ui, card: &FlipCard) {
    let (rect, _) = ui.allocate_exact_size(CARD_SIZE, Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::monospace(72.0);

    painter.rect_filled(rect, Rounding::same(CARD_ROUNDING), CARD_BACK);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        card_text(card.back()),
        font.clone(),
        DIGIT,
    );

    let scale = card
        .rotation()
        .map_or(1.0, |degrees| degrees.to_radians().cos().abs());
    let front = Rect::from_center_size(rect.center(), Vec2::new(rect.width(), rect.height() * scale));
    painter.rect_filled(front, Rounding::same(CARD_ROUNDING * scale), CARD_FACE);
    if scale >= MIN_TEXT_SCALE {
        painter.text(
            front.center(),
            Align2::CENTER_CENTER,
            card_text(card.front()),
            FontId::monospace(font.size * scale),
            DIGIT,
        );
    }

    painter.hline(rect.x_range(), rect.center().y, Stroke::new(2.0, CARD_SEAM));
}
