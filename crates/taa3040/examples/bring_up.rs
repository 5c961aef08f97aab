//! Host-side bring-up walkthrough.
//!
//! Runs the usual power-on sequence against an in-memory register file and
//! prints every bus transfer, so the I2C traffic can be compared with a logic
//! analyser capture.
//!
//! ```text
//! RUST_LOG=trace cargo run -p taa3040 --example bring_up --features tracing,std
//! ```

#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use taa3040::{
    AsiFormat, AsiWordLength, BiquadCoefficients, DeviceConfig, GpoMode, HighPassFilter,
    InputSource, SampleRate, Taa3040, DEFAULT_ADDRESS,
};
use tracing_subscriber::EnvFilter;

/// Register file that logs each transfer.
struct LoggingBus {
    regs: [[u8; 128]; 5],
    page: u8,
}

impl ErrorType for LoggingBus {
    type Error = ErrorKind;
}

impl I2c for LoggingBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut pointer = 0usize;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    tracing::info!("i2c {:#04x} W {:02x?}", address, data);
                    let Some((&reg, payload)) = data.split_first() else {
                        continue;
                    };
                    pointer = usize::from(reg);
                    for &value in payload {
                        if pointer == 0 {
                            self.page = value;
                        } else {
                            let page = usize::from(self.page);
                            let slot = self
                                .regs
                                .get_mut(page)
                                .and_then(|p| p.get_mut(pointer))
                                .ok_or(ErrorKind::Other)?;
                            *slot = value;
                        }
                        pointer += 1;
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = if pointer == 0 {
                            self.page
                        } else {
                            self.regs
                                .get(usize::from(self.page))
                                .and_then(|p| p.get(pointer))
                                .copied()
                                .ok_or(ErrorKind::Other)?
                        };
                        pointer += 1;
                    }
                    tracing::info!("i2c {:#04x} R {:02x?}", address, buf);
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bus = LoggingBus {
        regs: [[0; 128]; 5],
        page: 0,
    };
    let mut adc = Taa3040::new(bus, DEFAULT_ADDRESS);

    // Caller waits 1 ms after reset on real hardware.
    adc.reset()?;
    adc.wake()?;

    let mut config = DeviceConfig::default();
    config.asi.format = AsiFormat::I2s;
    config.asi.word_length = AsiWordLength::Bits32;
    config.asi.master.sample_rate = SampleRate::Khz96;
    for (i, ch) in config.channels.iter_mut().take(4).enumerate() {
        ch.enabled = true;
        ch.gain_db = 12;
        config.asi.channels[i].enabled = true;
    }
    config.channels[3].source = InputSource::DigitalPdm;
    config.gpio.gpo[0].mode = GpoMode::Interrupt;
    config.dsp.hpf = HighPassFilter::Custom;
    config.dsp.biquads[0] = BiquadCoefficients {
        n0: 0x7FFF_FFFF,
        ..BiquadCoefficients::default()
    };

    adc.write_config(&config)?;
    let readback = adc.read_config()?;
    tracing::info!("config read back intact: {}", readback == config);

    adc.set_gain(0, 24)?;
    tracing::info!("channel 1 gain now {} dB", adc.get_gain(0)?);

    adc.sleep()?;
    Ok(())
}
