//! Interactive dashboard.
//!
//! A single loop owns the [`Model`]: it draws, waits for the next inbox
//! event, applies it, and hands any resulting network calls to background
//! tasks. Terminal input and network completions share the inbox, so state
//! changes happen in arrival order on this one task.

pub mod controller;
pub mod event;
pub mod keymap;
pub mod state;
pub mod terminal;
pub mod view;

use tracing::info;

use crate::api::client::LightTransport;
use crate::error::AppError;
use crate::models::Device;
use controller::{refresh_all, update, CommandRunner};
use event::EventReader;
use state::Model;
use terminal::Tui;

pub async fn run<T: LightTransport>(devices: Vec<Device>, transport: T) -> Result<(), AppError> {
    terminal::install_panic_hook();
    let mut tui = Tui::new()?;
    tui.enter()?;

    let mut events = EventReader::new();
    let runner = CommandRunner::new(transport, events.sender());

    let mut model = Model::new(devices);
    let (width, height) = tui.size()?;
    model.resize(width, height);
    info!(lights = model.lights().len(), "dashboard started");

    runner.spawn_all(refresh_all(&model));

    while !model.should_quit() {
        tui.draw(|frame| view::render(frame, &model))?;

        let Some(event) = events.next().await else {
            break;
        };
        let commands = update(&mut model, event);
        runner.spawn_all(commands);
    }

    tui.exit();
    info!("dashboard closed");
    Ok(())
}
