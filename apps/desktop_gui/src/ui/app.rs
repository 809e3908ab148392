use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use tokio::time::Instant;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiEvent};
use crate::controller::reducer::FormController;
use crate::ui::clipboard::SystemClipboard;

const LOADING_REPAINT: Duration = Duration::from_millis(100);
const IDLE_REPAINT: Duration = Duration::from_millis(500);

fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::NONE
        .fill(lighten_color(ui.visuals().panel_fill, 0.04))
        .corner_radius(14.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(20, 18))
}

#[derive(Default)]
struct FrameActions {
    edited: Option<String>,
    submit: bool,
    copy: bool,
    clear: bool,
}

pub struct ShortenerApp {
    controller: FormController,
    ui_rx: Receiver<UiEvent>,
    clipboard: SystemClipboard,
}

impl ShortenerApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: FormController::new(cmd_tx),
            ui_rx,
            clipboard: SystemClipboard::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn show_status_banner(&self, ui: &mut egui::Ui) {
        let Some(banner) = self.controller.banner() else {
            return;
        };
        egui::Frame::NONE
            .fill(ui.visuals().error_fg_color.gamma_multiply(0.15))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        egui::RichText::new(err_label(banner.category())).strong(),
                    );
                    ui.label(banner.message());
                });
            });
        ui.add_space(8.0);
    }

    fn show_form(&self, ui: &mut egui::Ui, actions: &mut FrameActions) {
        let state = self.controller.state();
        let loading = state.is_loading();
        let error_message = state.error_message();

        card_frame(ui).show(ui, |ui| {
            ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

            let mut long_url_buf = state.long_url().to_string();
            let input = ui.add_enabled(
                !loading,
                egui::TextEdit::singleline(&mut long_url_buf)
                    .id_salt("long_url_input")
                    .hint_text("https://your-long-url.com/goes-here")
                    .desired_width(f32::INFINITY)
                    .margin(egui::Margin::symmetric(12, 10)),
            );
            if input.changed() {
                actions.edited = Some(long_url_buf);
            }
            if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.submit = true;
            }

            if !error_message.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, &error_message);
                });
            }

            ui.horizontal(|ui| {
                let clear_width = 88.0;
                let submit_width =
                    (ui.available_width() - clear_width - ui.spacing().item_spacing.x).max(120.0);
                let label = if loading { "Shortening..." } else { "Shorten URL" };
                let submit = ui.add_enabled(
                    !loading,
                    egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(egui::vec2(submit_width, 40.0)),
                );
                if submit.clicked() {
                    actions.submit = true;
                }
                if ui
                    .add(egui::Button::new("Clear").min_size(egui::vec2(clear_width, 40.0)))
                    .clicked()
                {
                    actions.clear = true;
                }
            });
            if loading {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                });
            }
        });
    }

    fn show_result_card(&self, ui: &mut egui::Ui, now: Instant, actions: &mut FrameActions) {
        let short_url = self.controller.state().short_url();
        if short_url.is_empty() {
            return;
        }
        let copied = self.controller.is_copied(now);

        ui.add_space(14.0);
        card_frame(ui).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(short_url)
                        .monospace()
                        .size(18.0)
                        .color(egui::Color32::from_rgb(45, 212, 191)),
                )
                .on_hover_text(short_url);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        actions.clear = true;
                    }
                    let copy_label = if copied { "Copied!" } else { "Copy" };
                    if ui.button(copy_label).clicked() {
                        actions.copy = true;
                    }
                });
            });
        });
    }

    fn apply_actions(&mut self, actions: FrameActions) {
        if let Some(text) = actions.edited {
            self.controller.edit(text);
        }
        if actions.submit {
            self.controller.submit();
        }
        if actions.copy {
            self.controller.copy(&mut self.clipboard, Instant::now());
        }
        if actions.clear {
            self.controller.clear();
        }
    }
}

impl eframe::App for ShortenerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let now = Instant::now();
        self.controller.tick(now);

        let mut actions = FrameActions::default();
        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            let card_width = avail.x.clamp(360.0, 640.0);
            ui.add_space((avail.y * 0.12).clamp(18.0, 90.0));

            ui.vertical_centered(|ui| {
                ui.set_width(card_width);
                ui.heading(egui::RichText::new("Instant URL Shortener").size(30.0).strong());
                ui.weak("Paste a long URL to get a shortened version instantly.");
                ui.add_space(16.0);

                self.show_status_banner(ui);
                self.show_form(ui, &mut actions);
                self.show_result_card(ui, now, &mut actions);

                if !self.controller.status().is_empty() {
                    ui.add_space(12.0);
                    ui.weak(self.controller.status());
                }
            });
        });
        self.apply_actions(actions);

        let mut repaint_after = if self.controller.state().is_loading() {
            LOADING_REPAINT
        } else {
            IDLE_REPAINT
        };
        if let Some(deadline) = self.controller.next_wakeup() {
            repaint_after = repaint_after.min(deadline.saturating_duration_since(now));
        }
        ctx.request_repaint_after(repaint_after);
    }
}
