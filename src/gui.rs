// src/gui.rs
use eframe::egui::{self, Color32};
use egui_plot::{Line, Plot, PlotPoints};
use std::sync::mpsc::{channel, Receiver, Sender};
use crate::engine;
use crate::history::SessionRecord;
use crate::session::{synth, SessionPhase};
use crate::types::{SessionCategory, SessionCommand, SessionMessage};

pub struct CognisyncApp {
    // session mirror
    phase: SessionPhase,
    seconds: u64,
    score: Option<f64>,
    show_score: bool,
    category: SessionCategory,

    // live display
    wave_points: Vec<[f64; 2]>,
    band_view: bool,
    band_time: f64,

    // interface
    selected_tab: String,
    log_messages: Vec<String>,
    history: Vec<SessionRecord>,

    // channels
    rx: Receiver<SessionMessage>,
    tx_cmd: Sender<SessionCommand>,
}

impl Default for CognisyncApp {
    fn default() -> Self {
        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();

        engine::spawn_thread(tx, rx_cmd);
        tx_cmd.send(SessionCommand::LoadHistory).ok();

        Self {
            phase: SessionPhase::Idle,
            seconds: 0,
            score: None,
            show_score: false,
            category: SessionCategory::Focus,
            wave_points: Vec::new(),
            band_view: false,
            band_time: 0.0,
            selected_tab: "Session".to_owned(),
            log_messages: vec!["Cognisync v0.1 Ready.".to_owned()],
            history: Vec::new(),
            rx,
            tx_cmd,
        }
    }
}

impl CognisyncApp {
    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn apply_frame(&mut self, frame: Vec<f64>) {
        self.band_time += 0.05;
        self.wave_points = frame
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, *v])
            .collect();
    }

    fn draw_waveform(&self, ui: &mut egui::Ui) {
        let sample_count = self.wave_points.len().max(synth::DEFAULT_SAMPLE_COUNT);
        Plot::new("session_plot")
            .view_aspect(2.4)
            .include_y(-80.0)
            .include_y(80.0)
            .show(ui, |plot_ui| {
                if self.band_view {
                    let shades = [
                        Color32::from_black_alpha(115),
                        Color32::from_black_alpha(90),
                        Color32::from_black_alpha(64),
                    ];
                    for (band, shade) in synth::Band::ALL.into_iter().zip(shades) {
                        if let Ok(frame) = synth::band_wave(band, sample_count, self.band_time) {
                            let points: Vec<[f64; 2]> = frame
                                .iter()
                                .enumerate()
                                .map(|(i, v)| [i as f64, *v])
                                .collect();
                            plot_ui.line(
                                Line::new(PlotPoints::new(points))
                                    .name(band.label())
                                    .color(shade),
                            );
                        }
                    }
                } else if !self.wave_points.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(self.wave_points.clone()))
                            .name("session")
                            .color(Color32::BLACK),
                    );
                }
            });
    }

    fn draw_score_card(&mut self, ui: &mut egui::Ui) {
        let Some(score) = self.score else { return };
        egui::Frame::none()
            .fill(Color32::from_rgb(30, 30, 30))
            .rounding(egui::Rounding::same(12.0))
            .inner_margin(egui::Margin::same(24.0))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Cognitive Score")
                            .color(Color32::from_rgb(110, 197, 233))
                            .size(20.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(format!("{score}"))
                            .color(Color32::from_rgb(247, 184, 1))
                            .size(44.0)
                            .strong(),
                    );
                    if ui.button("Restart Session").clicked() {
                        self.tx_cmd.send(SessionCommand::Restart).ok();
                        self.show_score = false;
                    }
                });
            });
    }

    fn draw_history(&self, ui: &mut egui::Ui) {
        if self.history.is_empty() {
            ui.label("No session history available.");
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            for record in &self.history {
                ui.group(|ui| {
                    ui.monospace(format!("Date: {}", record.session_date));
                    ui.monospace(format!("Category: {}", record.category));
                    ui.monospace(format!(
                        "Duration: {}",
                        format_elapsed(record.duration_seconds)
                    ));
                    ui.monospace(format!("Score: {}", record.score));
                });
            }
        });
    }
}

fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl eframe::App for CognisyncApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Message drain (bounded; stale frames are superseded anyway).
        let mut msg_count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            msg_count += 1;
            if msg_count > 20 {
                match msg {
                    SessionMessage::Frame(frame) => self.apply_frame(frame),
                    _ => continue,
                }
            } else {
                match msg {
                    SessionMessage::Log(s) => self.log(&s),
                    SessionMessage::Frame(frame) => self.apply_frame(frame),
                    SessionMessage::Elapsed(seconds) => self.seconds = seconds,
                    SessionMessage::Phase(phase) => {
                        self.phase = phase;
                        if phase == SessionPhase::Running {
                            self.show_score = false;
                            self.score = None;
                        }
                    }
                    SessionMessage::Score(score) => {
                        self.score = Some(score);
                        self.show_score = true;
                        self.tx_cmd.send(SessionCommand::LoadHistory).ok();
                    }
                    SessionMessage::History(records) => self.history = records,
                }
            }
        }

        if self.phase == SessionPhase::Running {
            ctx.request_repaint();
        }

        ctx.set_visuals(egui::Visuals::light());

        // 2. Controls
        egui::SidePanel::left("controls").min_width(240.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Cognisync v0.1");
            ui.label("Wellness Companion");
            ui.separator();

            ui.label("SESSION CATEGORY");
            let previous = self.category;
            ui.horizontal(|ui| {
                for category in SessionCategory::ALL {
                    ui.selectable_value(&mut self.category, category, category.label());
                }
            });
            if self.category != previous {
                self.tx_cmd.send(SessionCommand::SetCategory(self.category)).ok();
            }

            ui.add_space(10.0);
            match self.phase {
                SessionPhase::Idle => {
                    if ui.button("START SESSION").clicked() {
                        self.tx_cmd.send(SessionCommand::Start).ok();
                    }
                }
                SessionPhase::Running | SessionPhase::Paused => {
                    let pause_txt = if self.phase == SessionPhase::Paused {
                        "RESUME"
                    } else {
                        "PAUSE"
                    };
                    ui.horizontal(|ui| {
                        if ui.button(pause_txt).clicked() {
                            self.tx_cmd.send(SessionCommand::PauseResume).ok();
                        }
                        if ui.button("RESTART").clicked() {
                            self.tx_cmd.send(SessionCommand::Restart).ok();
                        }
                    });
                    let end_btn = egui::Button::new(
                        egui::RichText::new("END SESSION").color(Color32::WHITE),
                    )
                    .fill(Color32::from_rgb(233, 79, 55));
                    if ui.add(end_btn).clicked() {
                        self.tx_cmd.send(SessionCommand::End).ok();
                    }
                }
                SessionPhase::Ended => {
                    if ui.button("RESTART SESSION").clicked() {
                        self.tx_cmd.send(SessionCommand::Restart).ok();
                    }
                }
            }

            ui.add_space(10.0);
            ui.checkbox(&mut self.band_view, "Band view (α/β/γ)");
            let can_export = self.phase != SessionPhase::Idle;
            if ui
                .add_enabled(can_export, egui::Button::new("EXPORT PNG"))
                .clicked()
            {
                self.tx_cmd.send(SessionCommand::ExportSnapshot).ok();
            }

            ui.add_space(10.0);
            ui.separator();
            egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
        });

        // 3. Main view
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.selected_tab, "Session".to_owned(), "Session");
                ui.selectable_value(&mut self.selected_tab, "History".to_owned(), "History");
            });
            ui.separator();

            if self.selected_tab == "Session" {
                self.draw_waveform(ui);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format_elapsed(self.seconds))
                            .monospace()
                            .size(32.0),
                    );
                    ui.add(
                        egui::ProgressBar::new((self.seconds % 60) as f32 / 60.0)
                            .desired_width(240.0),
                    );
                });
                ui.add_space(16.0);
                if self.show_score {
                    ui.vertical_centered(|ui| self.draw_score_card(ui));
                }
            } else {
                self.draw_history(ui);
            }
        });
    }
}
