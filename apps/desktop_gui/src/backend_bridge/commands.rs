//! Backend commands queued from UI to backend worker.

use shared::domain::ViewMode;

#[derive(Debug)]
pub enum BackendCommand {
    SwitchMode(ViewMode),
    TogglePicker,
    PickerBackdropClicked,
    SelectConference { conference_id: String },
    LoadDate { date: String },
    ReloadCatalog,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SwitchMode(_) => "switch_mode",
            BackendCommand::TogglePicker => "toggle_picker",
            BackendCommand::PickerBackdropClicked => "picker_backdrop_clicked",
            BackendCommand::SelectConference { .. } => "select_conference",
            BackendCommand::LoadDate { .. } => "load_date",
            BackendCommand::ReloadCatalog => "reload_catalog",
        }
    }
}
