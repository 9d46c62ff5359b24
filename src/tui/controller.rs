//! Turns inbox events into model changes plus the network calls they need.
//!
//! [`update`] is pure: it mutates the model and returns [`Command`]s without
//! touching the network. [`CommandRunner`] carries them out in background
//! tasks that report back through the inbox.

use tracing::debug;

use super::event::{Event, EventSender, NetworkResult, Purpose};
use super::keymap::{action_for, Action};
use super::state::{Model, BRIGHTNESS_STEP, TEMPERATURE_STEP};
use crate::api::client::{LightTransport, Operation};
use crate::classify::classify;
use crate::models::Device;

/// One network call to make for the light at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub index: usize,
    pub device: Device,
    pub operation: Operation,
}

impl Command {
    pub fn purpose(&self) -> Purpose {
        match self.operation {
            Operation::Read => Purpose::Read,
            Operation::Write(_) => Purpose::Write,
        }
    }
}

/// A status read for every light.
pub fn refresh_all(model: &Model) -> Vec<Command> {
    model
        .lights()
        .iter()
        .enumerate()
        .map(|(index, light)| Command {
            index,
            device: light.device.clone(),
            operation: Operation::Read,
        })
        .collect()
}

/// Write the light's current local state, all fields included.
fn write_light(model: &Model, index: usize) -> Option<Command> {
    let light = model.light(index)?;
    Some(Command {
        index,
        device: light.device.clone(),
        operation: Operation::Write(light.state.with_power(light.state.power)),
    })
}

fn write_selected(model: &Model) -> Vec<Command> {
    write_light(model, model.cursor()).into_iter().collect()
}

pub fn update(model: &mut Model, event: Event) -> Vec<Command> {
    if model.should_quit() {
        return Vec::new();
    }

    match event {
        Event::Key(key) => match action_for(&key) {
            Some(action) => apply_action(model, action),
            None => Vec::new(),
        },
        Event::Resize(width, height) => {
            model.resize(width, height);
            Vec::new()
        }
        Event::Network(result) => {
            apply_network(model, result);
            Vec::new()
        }
        Event::InputClosed => {
            model.quit();
            Vec::new()
        }
    }
}

fn apply_action(model: &mut Model, action: Action) -> Vec<Command> {
    let selected = model.cursor();
    match action {
        Action::MoveUp => {
            model.move_cursor(-1);
            Vec::new()
        }
        Action::MoveDown => {
            model.move_cursor(1);
            Vec::new()
        }
        Action::ToggleSelected => {
            let Some(light) = model.selected() else {
                return Vec::new();
            };
            let power = !light.state.power;
            model.set_power(selected, power);
            write_selected(model)
        }
        Action::ToggleAll => {
            let power = !model.global_on();
            (0..model.lights().len())
                .filter_map(|index| {
                    model.set_power(index, power);
                    write_light(model, index)
                })
                .collect()
        }
        Action::BrightnessUp => {
            model.adjust_brightness(selected, BRIGHTNESS_STEP);
            write_selected(model)
        }
        Action::BrightnessDown => {
            model.adjust_brightness(selected, -BRIGHTNESS_STEP);
            write_selected(model)
        }
        Action::TemperatureUp => {
            model.adjust_temperature(selected, TEMPERATURE_STEP);
            write_selected(model)
        }
        Action::TemperatureDown => {
            model.adjust_temperature(selected, -TEMPERATURE_STEP);
            write_selected(model)
        }
        Action::Refresh => refresh_all(model),
        Action::Quit => {
            model.quit();
            Vec::new()
        }
    }
}

fn apply_network(model: &mut Model, network: NetworkResult) {
    match network.result {
        Ok(state) => model.apply_state(network.index, state),
        Err(kind) => {
            debug!(index = network.index, purpose = ?network.purpose, error = %kind, "light call failed");
            model.apply_failure(network.index, kind);
        }
    }
}

/// Runs commands in background tasks; each reports one [`Event::Network`].
pub struct CommandRunner<T> {
    transport: T,
    inbox: EventSender,
}

impl<T: LightTransport> CommandRunner<T> {
    pub fn new(transport: T, inbox: EventSender) -> Self {
        Self { transport, inbox }
    }

    pub fn spawn(&self, command: Command) {
        let transport = self.transport.clone();
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            let purpose = command.purpose();
            let result = transport
                .execute(&command.device, &command.operation)
                .await
                .map_err(|e| classify(&e));
            // The dashboard may already be gone.
            let _ = inbox.send(Event::Network(NetworkResult {
                index: command.index,
                purpose,
                result,
            }));
        });
    }

    pub fn spawn_all(&self, commands: Vec<Command>) {
        for command in commands {
            self.spawn(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::TransportError;
    use crate::classify::ErrorKind;
    use crate::models::{DeviceState, LightSettings};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::future::Future;
    use tokio::sync::mpsc;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    fn model(n: usize) -> Model {
        Model::new(
            (0..n)
                .map(|i| Device::new(format!("L{i}"), format!("10.0.0.{i}")))
                .collect(),
        )
    }

    fn state(power: bool, brightness: u8, temperature_kelvin: u16) -> DeviceState {
        DeviceState {
            power,
            brightness,
            temperature_kelvin,
        }
    }

    fn written(command: &Command) -> LightSettings {
        match command.operation {
            Operation::Write(settings) => settings,
            Operation::Read => panic!("expected a write"),
        }
    }

    #[test]
    fn test_toggle_selected_is_optimistic_with_full_fields() {
        let mut m = model(2);
        update(&mut m, key('j'));

        let commands = update(&mut m, enter());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].index, 1);
        assert_eq!(
            written(&commands[0]),
            LightSettings {
                power: true,
                brightness: Some(20),
                temperature_kelvin: Some(5000),
            }
        );
        assert!(m.light(1).unwrap().state.power);
        assert!(!m.light(0).unwrap().state.power);
    }

    #[test]
    fn test_toggle_all_sets_every_light_to_inverse_of_global() {
        let mut m = model(3);
        m.apply_state(0, state(true, 50, 4000));

        let commands = update(&mut m, key('g'));
        assert_eq!(commands.len(), 3);
        assert!(commands.iter().all(|c| written(c).power));
        assert!(m.global_on());

        let commands = update(&mut m, key('G'));
        assert!(commands.iter().all(|c| !written(c).power));
        assert!(m.lights().iter().all(|l| !l.state.power));
    }

    #[test]
    fn test_brightness_and_temperature_steps() {
        let mut m = model(1);

        let commands = update(&mut m, key('+'));
        assert_eq!(written(&commands[0]).brightness, Some(25));

        update(&mut m, key('-'));
        update(&mut m, key('-'));
        assert_eq!(m.light(0).unwrap().state.brightness, 15);

        let commands = update(&mut m, key('n'));
        assert_eq!(written(&commands[0]).temperature_kelvin, Some(5100));

        update(&mut m, key('m'));
        update(&mut m, key('m'));
        assert_eq!(m.light(0).unwrap().state.temperature_kelvin, 4900);
    }

    #[test]
    fn test_brightness_at_max_still_writes_clamped_value() {
        let mut m = model(1);
        m.apply_state(0, state(true, 100, 4000));
        let commands = update(&mut m, key('+'));
        assert_eq!(written(&commands[0]).brightness, Some(100));
    }

    #[test]
    fn test_refresh_reads_every_light_without_touching_state() {
        let mut m = model(2);
        m.set_power(0, true);

        let commands = update(&mut m, key('r'));
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| c.operation == Operation::Read));
        assert!(m.light(0).unwrap().state.power);
    }

    #[test]
    fn test_network_success_overwrites_local_state() {
        let mut m = model(1);
        m.apply_failure(0, ErrorKind::Timeout);

        update(
            &mut m,
            Event::Network(NetworkResult {
                index: 0,
                purpose: Purpose::Read,
                result: Ok(state(true, 70, 3200)),
            }),
        );
        let light = m.light(0).unwrap();
        assert_eq!(light.state, state(true, 70, 3200));
        assert_eq!(light.error, None);
    }

    #[test]
    fn test_network_failure_keeps_optimistic_state() {
        let mut m = model(1);
        update(&mut m, enter());

        update(
            &mut m,
            Event::Network(NetworkResult {
                index: 0,
                purpose: Purpose::Write,
                result: Err(ErrorKind::ConnectionFailed),
            }),
        );
        let light = m.light(0).unwrap();
        assert!(light.state.power);
        assert_eq!(light.error, Some(ErrorKind::ConnectionFailed));
    }

    #[test]
    fn test_later_write_result_wins() {
        let mut m = model(1);
        for (brightness, kelvin) in [(40, 3000), (60, 6500)] {
            update(
                &mut m,
                Event::Network(NetworkResult {
                    index: 0,
                    purpose: Purpose::Write,
                    result: Ok(state(true, brightness, kelvin)),
                }),
            );
        }
        assert_eq!(m.light(0).unwrap().state, state(true, 60, 6500));
    }

    #[test]
    fn test_lost_terminal_input_quits() {
        let mut m = model(1);
        assert!(update(&mut m, Event::InputClosed).is_empty());
        assert!(m.should_quit());
    }

    #[test]
    fn test_unknown_index_is_ignored() {
        let mut m = model(1);
        update(
            &mut m,
            Event::Network(NetworkResult {
                index: 9,
                purpose: Purpose::Read,
                result: Ok(state(true, 1, 3000)),
            }),
        );
        assert_eq!(m.light(0).unwrap().state.brightness, 20);
    }

    #[test]
    fn test_quit_stops_processing() {
        let mut m = model(1);
        update(&mut m, key('q'));
        assert!(m.should_quit());
        assert!(update(&mut m, enter()).is_empty());
        assert!(!m.light(0).unwrap().state.power);
    }

    #[test]
    fn test_no_lights_produces_no_commands() {
        let mut m = model(0);
        assert!(update(&mut m, enter()).is_empty());
        assert!(update(&mut m, key('+')).is_empty());
        assert!(update(&mut m, key('g')).is_empty());
        assert!(update(&mut m, key('r')).is_empty());
    }

    #[test]
    fn test_resize_records_size() {
        let mut m = model(1);
        update(&mut m, Event::Resize(80, 24));
        assert_eq!(m.size(), (80, 24));
    }

    #[derive(Clone)]
    struct EchoTransport;

    impl LightTransport for EchoTransport {
        fn execute(
            &self,
            device: &Device,
            operation: &Operation,
        ) -> impl Future<Output = Result<DeviceState, TransportError>> + Send {
            let fails = device.address == "10.0.0.1";
            let operation = *operation;
            async move {
                if fails {
                    return Err(TransportError::EmptyResponse);
                }
                Ok(match operation {
                    Operation::Read => state(false, 30, 4000),
                    Operation::Write(s) => state(s.power, 99, 6000),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_runner_reports_each_command_through_inbox() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = CommandRunner::new(EchoTransport, tx);
        let m = model(2);

        runner.spawn_all(refresh_all(&m));

        let mut results = Vec::new();
        for _ in 0..2 {
            match rx.recv().await {
                Some(Event::Network(result)) => results.push(result),
                other => panic!("unexpected event: {other:?}"),
            }
        }
        results.sort_by_key(|r| r.index);

        assert_eq!(results[0].purpose, Purpose::Read);
        assert_eq!(results[0].result, Ok(state(false, 30, 4000)));
        assert_eq!(results[1].result, Err(ErrorKind::EmptyResponse));
    }
}
