//! Backend worker: owns the tokio runtime and the mode controller, turns
//! queued UI commands into controller calls and page updates into UI events.

use std::{sync::Arc, thread};

use browser_core::{
    settings::Settings, AppHost, LoadOutcome, ModeController, PageSink, PageUpdate, PaperStore,
    ReadySignal, StaticSiteHost,
};
use crossbeam_channel::{Receiver, Sender};
use tokio::sync::Mutex;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

/// Page sink that forwards updates to the UI thread.
pub struct ChannelPage {
    ui_tx: Sender<UiEvent>,
}

impl ChannelPage {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl PageSink for ChannelPage {
    fn push(&self, update: PageUpdate) {
        if self.ui_tx.try_send(UiEvent::Page(update)).is_err() {
            tracing::warn!("ui event queue unavailable; dropping page update");
        }
    }
}

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    UiErrorCategory::Unknown,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let site = match settings.site_root() {
                Ok(site) => site,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                        UiErrorContext::Settings,
                        UiErrorCategory::Data,
                        format!("{err:#}"),
                    )));
                    tracing::error!("invalid site root: {err:#}");
                    return;
                }
            };
            tracing::info!(site = %site, "backend worker ready");

            let source = site.into_source();
            let page: Arc<dyn PageSink> = Arc::new(ChannelPage::new(ui_tx.clone()));
            let store = Arc::new(Mutex::new(PaperStore::default()));
            let host = Arc::new(StaticSiteHost::new(
                source.clone(),
                page.clone(),
                store.clone(),
                settings.site_paths(),
            ));
            let controller = Arc::new(ModeController::new(
                source,
                host.clone(),
                page,
                store,
                settings.site_paths(),
            ));

            let ready = ReadySignal::new();
            let dates = host.refresh_dates().await;
            let _ = ui_tx.try_send(UiEvent::DatesLoaded(dates.clone()));
            ready.mark_ready();
            let catalog = controller.init(&ready).await;
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "{} conferences, {} daily dates",
                catalog.len(),
                dates.len()
            )));
            if let Some(latest) = dates.first() {
                host.load_papers_by_date(latest).await;
            }

            while let Ok(cmd) = cmd_rx.recv() {
                // Mode and picker state changes apply in queue order; loads run
                // as tasks so a slow fetch never stalls the queue.
                match cmd {
                    BackendCommand::SwitchMode(mode) => {
                        if controller.enter_mode(mode).await {
                            let controller = controller.clone();
                            tokio::spawn(async move { controller.activate_mode(mode).await });
                        }
                    }
                    BackendCommand::TogglePicker => controller.toggle_picker().await,
                    BackendCommand::PickerBackdropClicked => {
                        controller.click_picker_backdrop(true).await
                    }
                    cmd => {
                        let controller = controller.clone();
                        let host = host.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            run_load_command(&controller, &host, &ui_tx, cmd).await;
                        });
                    }
                }
            }
        });
    });
}

async fn run_load_command(
    controller: &ModeController,
    host: &StaticSiteHost,
    ui_tx: &Sender<UiEvent>,
    cmd: BackendCommand,
) {
    match cmd {
        BackendCommand::SelectConference { conference_id } => {
            if let Some(LoadOutcome::Failed { message, code }) =
                controller.select_from_list(&conference_id).await
            {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_code(
                    UiErrorContext::ConferenceLoad,
                    code,
                    message,
                )));
            }
        }
        BackendCommand::LoadDate { date } => host.load_papers_by_date(&date).await,
        BackendCommand::ReloadCatalog => {
            let dates = host.refresh_dates().await;
            let _ = ui_tx.try_send(UiEvent::DatesLoaded(dates));
            let catalog = controller.load_catalog().await;
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Reloaded {} conferences",
                catalog.len()
            )));
        }
        BackendCommand::SwitchMode(mode) => controller.switch_mode(mode).await,
        BackendCommand::TogglePicker => controller.toggle_picker().await,
        BackendCommand::PickerBackdropClicked => controller.click_picker_backdrop(true).await,
    }
}
