use browser_core::{PageModel, Region};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::panels;

pub struct PaperBrowserApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    page: PageModel,
    dates: Vec<String>,
    selected_date: Option<String>,
    status: String,
    error_banner: Option<String>,
}

impl PaperBrowserApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            page: PageModel::default(),
            dates: Vec::new(),
            selected_date: None,
            status: "Starting...".to_string(),
            error_banner: None,
        }
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Page(update) => self.page.apply(update),
                UiEvent::DatesLoaded(dates) => {
                    let still_listed = self
                        .selected_date
                        .as_ref()
                        .is_some_and(|date| dates.contains(date));
                    if !still_listed {
                        self.selected_date = dates.first().cloned();
                    }
                    self.dates = dates;
                }
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::warn!(category = ?err.category(), "{}", err.message());
                    self.status = err.banner_text();
                    self.error_banner = Some(err.banner_text());
                }
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }
}

impl eframe::App for PaperBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut queued = Vec::new();
        egui::TopBottomPanel::top("mode_bar").show(ctx, |ui| {
            panels::mode_bar(
                ui,
                &self.page,
                &self.dates,
                &mut self.selected_date,
                &mut queued,
            );
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(banner) = &self.error_banner {
                    ui.colored_label(ui.visuals().error_fg_color, banner);
                    if ui.small_button("Dismiss").clicked() {
                        self.error_banner = None;
                    }
                } else {
                    ui.label(&self.status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::paper_area(ui, self.page.paper_area());
        });

        if self.page.is_visible(Region::ConferencePickerModal) {
            panels::conference_picker(ctx, &self.page, &mut queued);
        }

        for cmd in queued {
            self.send(cmd);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_core::{view::Placeholder, PageUpdate, PaperArea};
    use crossbeam_channel::bounded;

    fn app() -> (PaperBrowserApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (PaperBrowserApp::new(cmd_tx, ui_rx), ui_tx, cmd_rx)
    }

    #[test]
    fn page_events_update_the_local_model() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx
            .send(UiEvent::Page(PageUpdate::SetVisible {
                region: Region::ConferencePickerModal,
                visible: true,
            }))
            .unwrap();
        ui_tx
            .send(UiEvent::Page(PageUpdate::PaperArea(PaperArea::Placeholder(
                Placeholder::Loading {
                    name: "NeurIPS 2024".to_string(),
                },
            ))))
            .unwrap();
        app.process_ui_events();

        assert!(app.page().is_visible(Region::ConferencePickerModal));
        assert_eq!(
            app.page().paper_area(),
            &PaperArea::Placeholder(Placeholder::Loading {
                name: "NeurIPS 2024".to_string()
            })
        );
    }

    #[test]
    fn loaded_dates_select_the_latest_unless_still_listed() {
        let (mut app, ui_tx, _cmd_rx) = app();
        ui_tx
            .send(UiEvent::DatesLoaded(vec![
                "2025-02-03".to_string(),
                "2025-02-02".to_string(),
            ]))
            .unwrap();
        app.process_ui_events();
        assert_eq!(app.selected_date.as_deref(), Some("2025-02-03"));

        app.selected_date = Some("2025-02-02".to_string());
        ui_tx
            .send(UiEvent::DatesLoaded(vec![
                "2025-02-04".to_string(),
                "2025-02-02".to_string(),
            ]))
            .unwrap();
        app.process_ui_events();
        assert_eq!(app.selected_date.as_deref(), Some("2025-02-02"));
    }

    #[test]
    fn queued_commands_reach_the_backend() {
        let (mut app, _ui_tx, cmd_rx) = app();
        app.send(BackendCommand::TogglePicker);
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::TogglePicker)));
    }
}
