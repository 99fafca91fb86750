//! Main application structure for the Artistry GUI

use std::sync::Arc;
use std::time::{Duration, Instant};

use artistry_core::{Notification, SlotKind, ThemePreference};
use chrono::Local;

use crate::async_bridge::{AsyncBridge, TransferUpdate};
use crate::dialogs;
use crate::file_drop::first_dropped_image;
use crate::object_urls::EguiObjectUrls;
use crate::state::{AppState, DropTarget};
use crate::ui_state::{LogEntry, LogLevel, Theme, UiState};
use crate::widgets;
use crate::widgets::upload_zone::ZoneEvent;

/// Main application struct implementing eframe::App
pub struct ArtistryApp {
    /// Domain state
    state: AppState,

    /// UI state
    ui_state: UiState,

    /// Async runtime bridge
    async_bridge: AsyncBridge,

    /// Last config save time
    last_save: Instant,

    /// Config dirty flag
    config_dirty: bool,
}

impl ArtistryApp {
    /// Create a new ArtistryApp
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let store = Arc::new(EguiObjectUrls::new(cc.egui_ctx.clone()));
        let (state, warnings) = AppState::new(store);
        let theme = match state.config.ui.theme {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        };

        let mut app = Self {
            state,
            ui_state: UiState::new(theme),
            async_bridge: AsyncBridge::new(),
            last_save: Instant::now(),
            config_dirty: false,
        };

        app.add_log(LogLevel::Info, "Application started");
        app.add_log(
            LogLevel::Info,
            format!("Backend endpoint: {}", app.state.config.backend.endpoint),
        );
        for warning in warnings {
            app.add_log(LogLevel::Warning, warning);
        }
        if let Err(e) = &app.state.client {
            let message = format!("Backend client unavailable: {}", e);
            app.add_log(LogLevel::Error, message);
        }

        app
    }

    /// Add a log entry
    fn add_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.ui_state.add_log_entry(LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        });
    }

    fn notify(&mut self, notification: Notification) {
        let level = if notification.is_error() {
            LogLevel::Error
        } else {
            LogLevel::Info
        };
        self.add_log(level, format!("{}: {}", notification.title, notification.description));
        self.ui_state.push_toast(notification, Instant::now());
    }

    /// Apply theme to egui context
    fn apply_theme(&self, ctx: &egui::Context) {
        let visuals = match self.ui_state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);
    }

    /// Auto-save configuration if dirty and enough time has passed
    fn handle_auto_save(&mut self) {
        if self.config_dirty && self.last_save.elapsed() > Duration::from_millis(300) {
            if let Err(e) = self.state.save_config() {
                self.add_log(LogLevel::Error, format!("Failed to save config: {}", e));
            }
            self.config_dirty = false;
            self.last_save = Instant::now();
        }
    }

    fn toggle_theme(&mut self) {
        self.ui_state.theme = self.ui_state.theme.toggled();
        self.state.config.ui.theme = match self.ui_state.theme {
            Theme::Dark => ThemePreference::Dark,
            Theme::Light => ThemePreference::Light,
        };
        self.config_dirty = true;
    }

    /// Handle a finished request from the async bridge
    fn handle_transfer_update(&mut self, update: TransferUpdate) {
        self.add_log(
            LogLevel::Info,
            format!("Backend answered after {:.1}s", update.elapsed_ms / 1000.0),
        );
        if let Some(notification) = self.state.orchestrator.finish_transfer(update.outcome) {
            self.notify(notification);
        }
    }

    /// Start a transfer if the orchestrator is ready
    fn start_transfer(&mut self, ctx: &egui::Context) {
        match self.state.begin_transfer() {
            Ok(Some((client, request))) => {
                self.add_log(LogLevel::Info, format!("Posting to {}", client.endpoint()));
                self.async_bridge.spawn_transfer(client, request, ctx.clone());
            }
            Ok(None) => {}
            Err(e) => self.notify(Notification::transfer_failed(e)),
        }
    }

    /// Route OS file drags to the zone under the pointer
    fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, pointer) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.pointer.latest_pos(),
            )
        });

        let target = self.state.drop_target(&self.ui_state.zone_rects, pointer);
        for slot in SlotKind::ALL {
            let zone = self.state.zone_mut(slot);
            if hovering && target.slot() == Some(slot) {
                zone.drag_over();
            } else if zone.is_dragging() {
                zone.drag_leave();
            }
        }

        if dropped.is_empty() {
            return;
        }
        let slot = match target {
            DropTarget::Slot(slot) => slot,
            DropTarget::Occupied(slot) => {
                let message = format!("Drop ignored: {} already has an image", slot.title());
                self.add_log(LogLevel::Info, message);
                return;
            }
            DropTarget::NoEmptySlot => {
                self.add_log(LogLevel::Info, "Drop ignored: both slots are filled");
                return;
            }
        };

        let file = match first_dropped_image(&dropped) {
            None => return,
            Some(Ok(file)) => file,
            Some(Err(e)) => {
                self.add_log(LogLevel::Warning, format!("Unreadable drop: {}", e));
                return;
            }
        };
        let name = file.name.clone();
        if self.state.drop_files(slot, vec![file]) {
            self.add_log(LogLevel::Info, format!("{}: {}", slot.title(), name));
        }
    }

    fn log_zone_events(&mut self, slot: SlotKind, events: Vec<ZoneEvent>) {
        for event in events {
            match event {
                ZoneEvent::Selected(what) => {
                    self.add_log(LogLevel::Info, format!("{}: {}", slot.title(), what))
                }
                ZoneEvent::Removed => {
                    self.add_log(LogLevel::Info, format!("{} removed", slot.title()))
                }
                ZoneEvent::Failed(message) => self.add_log(LogLevel::Error, message),
            }
        }
    }

    fn save_result(&mut self) {
        let Some(result) = self.state.orchestrator.result() else {
            return;
        };
        let Some(path) = dialogs::save_result(result.image.extension()) else {
            return;
        };
        match std::fs::write(&path, &result.image.bytes[..]) {
            Ok(()) => self.add_log(LogLevel::Info, format!("Saved {}", path.display())),
            Err(e) => {
                let message = format!("Failed to save {}: {}", path.display(), e);
                self.notify(Notification::transfer_failed(message));
            }
        }
    }

    /// Render the top panel with title and theme toggle
    fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Artistic Style Transfer");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match self.ui_state.theme {
                        Theme::Dark => "☀ Light",
                        Theme::Light => "🌙 Dark",
                    };
                    if ui.button(theme_label).clicked() {
                        self.toggle_theme();
                    }
                });
            });
        });
    }

    /// Render the main UI content
    fn render_main_ui(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(
                            "Transform your images with the elegance of neural style transfer",
                        )
                        .size(16.0)
                        .weak(),
                    );
                });

                ui.add_space(16.0);

                // Upload zones
                let mut zone_events = Vec::new();
                ui.columns(2, |columns| {
                    for (column, slot) in columns.iter_mut().zip(SlotKind::ALL) {
                        let (zone, orchestrator) = self.state.zone_and_orchestrator(slot);
                        let response = widgets::upload_zone::render(column, zone, orchestrator);
                        self.ui_state.zone_rects.insert(slot, response.rect);
                        zone_events.push((slot, response.events));
                    }
                });
                for (slot, events) in zone_events {
                    self.log_zone_events(slot, events);
                }

                ui.add_space(16.0);

                // Submit
                ui.separator();
                if widgets::transfer_button::render(ui, &self.state.orchestrator) {
                    self.start_transfer(ui.ctx());
                }
                widgets::progress_display::render(
                    ui,
                    self.state.orchestrator.state(),
                    self.state.orchestrator.elapsed_ms(),
                );
                ui.separator();

                ui.add_space(8.0);

                // Result
                let mut save_clicked = false;
                if let Some(result) = self.state.orchestrator.result() {
                    ui.group(|ui| {
                        ui.set_min_width(ui.available_width());
                        save_clicked = widgets::result_display::render(ui, result);
                    });
                    ui.add_space(8.0);
                }
                if save_clicked {
                    self.save_result();
                }

                // Technical log
                let log_response = egui::CollapsingHeader::new("Technical Log")
                    .default_open(self.ui_state.technical_log_expanded)
                    .show(ui, |ui| {
                        widgets::technical_log::render(ui, &mut self.ui_state);
                    });
                if log_response.header_response.clicked() {
                    self.ui_state.technical_log_expanded = !self.ui_state.technical_log_expanded;
                }
            });
    }
}

impl eframe::App for ArtistryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme
        self.apply_theme(ctx);

        // Poll for finished requests - collect first to avoid borrow checker issues
        let mut updates = Vec::new();
        self.async_bridge.poll_updates(|update| {
            updates.push(update);
        });
        for update in updates {
            self.handle_transfer_update(update);
        }

        self.handle_file_drops(ctx);

        // Top panel
        self.render_top_panel(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main_ui(ui);
        });

        // Toasts
        let now = Instant::now();
        self.ui_state.expire_toasts(now);
        widgets::toasts::render(ctx, &self.ui_state.toasts);

        // Keep the elapsed counter and toast expiry moving
        if self.state.orchestrator.state().is_processing() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if !self.ui_state.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        // Auto-save
        self.handle_auto_save();
    }
}
