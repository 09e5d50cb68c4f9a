#![no_std]
#![no_main]

use bitbot_hal::{
    platform::microbit::MicrobitPins, Bitbot, LightSensor, Motor, NeoPixelColor, PingUnit,
};
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::{bind_interrupts, saadc};
use embassy_time::Timer;
use microbit_bsp::Microbit;
#[allow(unused_imports)]
use {defmt_rtt as _, panic_probe as _};

/// Forward speed for a distance to the nearest obstacle, in centimeters.
fn cruise_speed(distance: Option<f32>) -> i32 {
    const STOP_CM: f32 = 25.0;
    const SLOW_CM: f32 = 50.0;
    match distance {
        Some(d) if d <= STOP_CM => 0,
        #[allow(clippy::cast_possible_truncation)]
        Some(d) if d <= SLOW_CM => 400 + ((d - STOP_CM) * 16.0) as i32,
        _ => 800,
    }
}

#[embassy_executor::main]
async fn main(#[allow(unused_variables)] s: Spawner) {
    let board = Microbit::default();

    info!("Hello");

    bind_interrupts!(struct Irq{
        SAADC => saadc::InterruptHandler;
    });
    let irq = Irq {};

    let pins = MicrobitPins::new(board, irq).await;
    let mut bot = Bitbot::new(pins);

    if let Err(e) = bot.neo_show_rainbow().await {
        warn!("rainbow: {}", e);
    }
    Timer::after_millis(500).await;

    loop {
        let distance = match bot.sonar(PingUnit::Centimeters).await {
            Ok(distance) => distance,
            Err(e) => {
                warn!("sonar: {}", e);
                None
            }
        };
        let speed = cruise_speed(distance);
        info!("distance: {} cm, speed: {}", distance, speed);

        let left = bot.read_light(LightSensor::Left).await.unwrap_or(0);
        let right = bot.read_light(LightSensor::Right).await.unwrap_or(0);
        let diff = (i32::from(right) - i32::from(left)) / 4;
        info!("light: {} {}, diff: {}", left, right, diff);

        let steer = if speed == 0 { 0 } else { diff.clamp(-200, 200) };
        let color = match speed {
            0 => NeoPixelColor::Red,
            1..=799 => NeoPixelColor::Yellow,
            _ => NeoPixelColor::Green,
        };

        let result = async {
            bot.motor(Motor::Left, speed + steer)?;
            bot.motor(Motor::Right, speed - steer)?;
            bot.buzz(i32::from(speed == 0))?;
            bot.neo_show_color(color.rgb()).await
        }
        .await;
        if let Err(e) = result {
            warn!("drive: {}", e);
        }

        Timer::after_millis(100).await;
    }
}
