//! One-shot hardware peripheral initialization and raw GPIO/UART access.
//!
//! Configures GPIO directions and the command UART using raw ESP-IDF sys
//! calls.  Called once from `main()` before the poll loop starts.
//!
//! [`GpioOutput`] and [`GpioInput`] expose configured pins through the
//! `embedded-hal` digital traits so the drivers stay target-agnostic.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::config::SystemConfig;
use crate::error::{GpioError, Result};
#[cfg(target_os = "espidf")]
use crate::error::{Error, SerialError};
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals(config: &SystemConfig) -> Result<()> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
        init_uart(config.serial_baud)?;
    }
    log::info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(config: &SystemConfig) -> Result<()> {
    log::info!(
        "hw_init(sim): peripheral init skipped (UART {} baud)",
        config.serial_baud
    );
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    let output_pins = [pins::LED_GPIO, pins::RELAY_GPIO, pins::BUZZER_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let rc = unsafe { gpio_config(&cfg) };
        if rc != ESP_OK {
            return Err(GpioError::ConfigFailed { pin, rc }.into());
        }
        // Outputs start released: relay open, buzzer silent, LED dark.
        unsafe { gpio_set_level(pin, 0) };
    }

    log::info!("hw_init: GPIO outputs configured");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BUTTON_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let rc = unsafe { gpio_config(&cfg) };
    if rc != ESP_OK {
        return Err(GpioError::ConfigFailed {
            pin: pins::BUTTON_GPIO,
            rc,
        }
        .into());
    }

    log::info!("hw_init: button input configured (pull-up)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host stand-in: inputs float high (button released).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> core::result::Result<(), GpioError> {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    let rc = unsafe { gpio_set_level(pin, u32::from(high)) };
    if rc != ESP_OK {
        return Err(GpioError::WriteFailed);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> core::result::Result<(), GpioError> {
    Ok(())
}

/// A configured output pin, by GPIO number.
#[derive(Debug, Clone, Copy)]
pub struct GpioOutput(pub i32);

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> core::result::Result<(), GpioError> {
        gpio_write(self.0, false)
    }

    fn set_high(&mut self) -> core::result::Result<(), GpioError> {
        gpio_write(self.0, true)
    }
}

/// A configured input pin, by GPIO number.
#[derive(Debug, Clone, Copy)]
pub struct GpioInput(pub i32);

impl ErrorType for GpioInput {
    type Error = GpioError;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(gpio_read(self.0))
    }

    fn is_low(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(!gpio_read(self.0))
    }
}

// ── UART (command channel) ────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_uart(baud: u32) -> Result<()> {
    let baud_rate = i32::try_from(baud).map_err(|_| Error::Init("UART baud out of range"))?;
    let cfg = uart_config_t {
        baud_rate,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };
    let port = pins::COMMAND_UART_PORT;

    let rc = unsafe { uart_param_config(port, &cfg) };
    if rc != ESP_OK {
        return Err(SerialError::DriverInstall(rc).into());
    }

    let rc = unsafe { uart_set_pin(port, pins::UART_TX_GPIO, pins::UART_RX_GPIO, -1, -1) };
    if rc != ESP_OK {
        return Err(SerialError::DriverInstall(rc).into());
    }

    // RX ring buffer only; TX writes go straight to the FIFO.
    let rc = unsafe {
        uart_driver_install(
            port,
            pins::UART_RX_BUFFER_BYTES,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if rc != ESP_OK {
        return Err(SerialError::DriverInstall(rc).into());
    }

    log::info!("hw_init: UART{} configured ({} baud, 8N1)", port, baud);
    Ok(())
}

/// Non-blocking single-byte read from the command UART.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> core::result::Result<Option<u8>, SerialError> {
    let mut byte = 0u8;
    // SAFETY: driver installed by init_uart(); zero ticks means the call
    // returns immediately with whatever is already buffered.
    let n = unsafe {
        uart_read_bytes(
            pins::COMMAND_UART_PORT,
            (&raw mut byte).cast(),
            1,
            0,
        )
    };
    match n {
        1 => Ok(Some(byte)),
        0 => Ok(None),
        _ => Err(SerialError::ReadFailed),
    }
}

/// Single-byte write to the command UART.
#[cfg(target_os = "espidf")]
pub fn uart_write_byte(byte: u8) -> core::result::Result<(), SerialError> {
    // SAFETY: driver installed by init_uart(); `byte` outlives the call.
    let n = unsafe {
        uart_write_bytes(pins::COMMAND_UART_PORT, (&raw const byte).cast(), 1)
    };
    if n == 1 {
        Ok(())
    } else {
        Err(SerialError::WriteFailed)
    }
}
