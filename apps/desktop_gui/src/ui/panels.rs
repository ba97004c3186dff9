//! Panel renderers. Each reads the page model and queues backend commands;
//! none of them mutate page state directly.

use browser_core::{
    view::{ConferenceListView, PaperCard, Placeholder},
    PageModel, PaperArea, Region,
};
use eframe::egui;
use shared::domain::ViewMode;

use crate::backend_bridge::commands::BackendCommand;

pub fn mode_bar(
    ui: &mut egui::Ui,
    page: &PageModel,
    dates: &[String],
    selected_date: &mut Option<String>,
    queued: &mut Vec<BackendCommand>,
) {
    ui.horizontal(|ui| {
        if ui
            .selectable_label(page.is_active(Region::DailyModeButton), "Daily")
            .clicked()
        {
            queued.push(BackendCommand::SwitchMode(ViewMode::Daily));
        }
        if ui
            .selectable_label(page.is_active(Region::ConferenceModeButton), "Conference")
            .clicked()
        {
            queued.push(BackendCommand::SwitchMode(ViewMode::Conference));
        }
        ui.separator();

        if page.is_visible(Region::DailySelector) {
            date_selector(ui, dates, selected_date, queued);
        }
        if page.is_visible(Region::ConferenceSelector) {
            let label = page
                .text(Region::CurrentConference)
                .filter(|text| !text.is_empty())
                .unwrap_or("Select Conference");
            if ui.button(format!("{label} ▾")).clicked() {
                queued.push(BackendCommand::TogglePicker);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Reload").clicked() {
                queued.push(BackendCommand::ReloadCatalog);
            }
        });
    });
}

fn date_selector(
    ui: &mut egui::Ui,
    dates: &[String],
    selected_date: &mut Option<String>,
    queued: &mut Vec<BackendCommand>,
) {
    if dates.is_empty() {
        ui.label("No daily files");
        return;
    }
    let current = selected_date.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("daily_date")
        .selected_text(current.as_str())
        .show_ui(ui, |ui| {
            for date in dates {
                if ui.selectable_label(*date == current, date).clicked() && *date != current {
                    *selected_date = Some(date.clone());
                    queued.push(BackendCommand::LoadDate { date: date.clone() });
                }
            }
        });
}

pub fn conference_picker(ctx: &egui::Context, page: &PageModel, queued: &mut Vec<BackendCommand>) {
    let response = egui::Modal::new(egui::Id::new("conference_picker")).show(ctx, |ui| {
        ui.set_width(460.0);
        ui.heading("Select Conference");
        ui.separator();
        match page.conference_list() {
            ConferenceListView::Empty => {
                ui.label("No conferences available");
            }
            ConferenceListView::Items(items) => {
                egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
                    for item in items {
                        let clicked = egui::Frame::group(ui.style())
                            .show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    ui.strong(&item.name);
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| ui.weak(&item.count_label),
                                    );
                                });
                                ui.horizontal(|ui| {
                                    ui.label(&item.date);
                                    ui.label(&item.category);
                                    ui.label(&item.year_label);
                                });
                                if let Some(description) = &item.description {
                                    ui.weak(description);
                                }
                            })
                            .response
                            .interact(egui::Sense::click())
                            .clicked();
                        if clicked {
                            queued.push(BackendCommand::SelectConference {
                                conference_id: item.id.clone(),
                            });
                        }
                    }
                });
            }
        }
        ui.separator();
        if ui.button("Close").clicked() {
            queued.push(BackendCommand::TogglePicker);
        }
    });
    if response.should_close() {
        queued.push(BackendCommand::PickerBackdropClicked);
    }
}

pub fn paper_area(ui: &mut egui::Ui, area: &PaperArea) {
    match area {
        PaperArea::Placeholder(placeholder) => placeholder_view(ui, placeholder),
        PaperArea::Papers(cards) => {
            ui.weak(format!("{} papers", cards.len()));
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for card in cards {
                        paper_card(ui, card);
                        ui.add_space(6.0);
                    }
                });
        }
    }
}

fn placeholder_view(ui: &mut egui::Ui, placeholder: &Placeholder) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        if matches!(placeholder, Placeholder::Loading { .. }) {
            ui.spinner();
        }
        let headline = placeholder.headline();
        if !headline.is_empty() {
            ui.heading(headline);
        }
        for line in placeholder.details() {
            ui.label(line);
        }
    });
}

fn paper_card(ui: &mut egui::Ui, card: &PaperCard) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&card.title).strong().size(16.0));
        if !card.authors.is_empty() {
            ui.weak(card.authors.join(", "));
        }
        if !card.summary.is_empty() {
            ui.label(&card.summary);
        }
        ui.horizontal(|ui| {
            if !card.id.is_empty() {
                ui.monospace(&card.id);
            }
            if let Some(abs) = &card.abs_url {
                ui.hyperlink_to("abs", abs);
            }
            if let Some(pdf) = &card.pdf_url {
                ui.hyperlink_to("pdf", pdf);
            }
            if !card.categories.is_empty() {
                ui.weak(card.categories.join(" · "));
            }
        });
    });
}
