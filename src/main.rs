//! Firmware for a five key LCD keypad shield ladder wired to GPIO26 of an RP2040.
//!
//! The sampling task decodes the ladder every few milliseconds and turns the decoded
//! state into key events; the reporting task logs them over RTT.

#![no_std]
#![no_main]

use analog_multi_button::keypad::{self, Key};
use analog_multi_button::{AnalogMultiButton, AnalogSource, ButtonConfig};
use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::gpio::Pull;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

/// How often the ladder is read
const SAMPLE_PERIOD: Duration = Duration::from_millis(5);

/// The RP2040 converter is 12 bits wide
const ADC_RESOLUTION: u16 = 4096;

/// Hold time before a press counts as long and starts repeating
const LONG_PRESS: Duration = Duration::from_millis(600);

/// Period of the repeated events while a key stays held past [LONG_PRESS]
const REPEAT: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, Format)]
enum KeyEvent {
    Pressed(Key),
    LongPress(Key),
    Repeat(Key),
    Released { key: Key, long: bool },
}

type EventChannel = Channel<ThreadModeRawMutex, KeyEvent, 16>;
type EventSender = Sender<'static, ThreadModeRawMutex, KeyEvent, 16>;
type EventReceiver = Receiver<'static, ThreadModeRawMutex, KeyEvent, 16>;
static EVENT_CHANNEL: EventChannel = Channel::new();

/// The ladder's pin, read through the blocking ADC driver
struct LadderPin {
    adc: Adc<'static, Blocking>,
    channel: adc::Channel<'static>,
}

impl AnalogSource for LadderPin {
    type Error = adc::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.adc.blocking_read(&mut self.channel)
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Configuring analog keypad...");

    let p = embassy_rp::init(Default::default());

    // the ladder drives the pin, so no pull
    let pin = LadderPin {
        adc: Adc::new_blocking(p.ADC, adc::Config::default()),
        channel: adc::Channel::new_pin(p.PIN_26, Pull::None),
    };

    let values = keypad::scale_values(ADC_RESOLUTION);
    let config = ButtonConfig::default().with_analog_resolution(ADC_RESOLUTION);
    let buttons = unwrap!(AnalogMultiButton::new(pin, &values, config));

    info!("Configuration complete");

    info!("Spawning event reporting task");
    unwrap!(spawner.spawn(report_events(EVENT_CHANNEL.receiver())));

    info!("Spawning keypad sampling task");
    unwrap!(spawner.spawn(sample_buttons(buttons, EVENT_CHANNEL.sender())));
}

/// Ticks the decoder once per [SAMPLE_PERIOD] and forwards key events through the
/// [EventSender] channel.
#[embassy_executor::task]
async fn sample_buttons(mut buttons: AnalogMultiButton<LadderPin>, sender: EventSender) {
    let mut ticker = Ticker::every(SAMPLE_PERIOD);

    info!("Starting keypad sampling loop");
    loop {
        match buttons.update() {
            Ok(_) => {
                let decoder = buttons.decoder();
                for key in Key::ALL {
                    let index = key.index();

                    if decoder.on_press(index) {
                        sender.send(KeyEvent::Pressed(key)).await;
                    }

                    // the first repeat lands on the long press itself
                    if decoder.on_press_after(index, LONG_PRESS) {
                        sender.send(KeyEvent::LongPress(key)).await;
                    } else if decoder.on_press_after_repeat(index, LONG_PRESS, REPEAT) {
                        sender.send(KeyEvent::Repeat(key)).await;
                    }

                    if decoder.on_release(index) {
                        let long = decoder.on_release_after(index, LONG_PRESS);
                        sender.send(KeyEvent::Released { key, long }).await;
                    }
                }
            }
            Err(e) => warn!("Failed to read keypad ladder: {:?}", e),
        }

        ticker.next().await;
    }
}

/// Logs every key event as it arrives
#[embassy_executor::task]
async fn report_events(receiver: EventReceiver) {
    loop {
        match receiver.receive().await {
            KeyEvent::Pressed(key) => info!("{} pressed", key.name()),
            KeyEvent::LongPress(key) => info!("{} long press", key.name()),
            KeyEvent::Repeat(key) => info!("{} repeat", key.name()),
            KeyEvent::Released { key, long } => {
                info!("{} released after a {} press", key.name(), if long { "long" } else { "short" })
            }
        }
    }
}
