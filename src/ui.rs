//! SDL2 User Interface
//!
//! Window, input events, and frame presentation. Each pass through the
//! loop runs one simulation step (`update` + `compose`) and then blits
//! the PPU's video buffer, so the buffer is never read mid-step.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use std::time::{Duration, Instant};

use crate::game::Game;
use crate::input::Button;
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Scale factor for the window
pub const SCALE: u32 = 3;

/// SDL2 UI wrapper
pub struct Ui {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    texture_creator: TextureCreator<WindowContext>,
}

impl Ui {
    /// Create a new UI instance
    pub fn new() -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(
                "flamingo",
                SCREEN_WIDTH as u32 * SCALE,
                SCREEN_HEIGHT as u32 * SCALE,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        // Prefer software renderer for compatibility on systems where
        // accelerated backends are unavailable or unstable.
        let canvas = window
            .into_canvas()
            .software()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok(Self { canvas, event_pump, texture_creator })
    }

    /// Run the game loop until quit
    pub fn run(&mut self, game: &mut Game) -> Result<(), String> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(
                PixelFormatEnum::ARGB8888,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let frame_duration = Duration::from_secs_f64(1.0 / 60.0);
        let mut last_step = Instant::now();

        'running: loop {
            let frame_start = Instant::now();

            // Handle events
            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => break 'running,
                    Event::KeyDown { keycode: Some(key), .. } => {
                        if key == Keycode::Escape {
                            break 'running;
                        }
                        if let Some(button) = keycode_to_button(key) {
                            game.input.set_button(button, true);
                        }
                    }
                    Event::KeyUp { keycode: Some(key), .. } => {
                        if let Some(button) = keycode_to_button(key) {
                            game.input.set_button(button, false);
                        }
                    }
                    _ => {}
                }
            }

            // One simulation step, then one draw step
            let elapsed = last_step.elapsed().as_secs_f32();
            last_step = Instant::now();
            game.update(elapsed);
            game.compose();

            // Blit the video buffer
            let video_buffer = &game.ppu.video_buffer;
            texture
                .update(
                    None,
                    unsafe {
                        std::slice::from_raw_parts(
                            video_buffer.as_ptr() as *const u8,
                            video_buffer.len() * 4,
                        )
                    },
                    SCREEN_WIDTH * 4,
                )
                .map_err(|e| e.to_string())?;

            self.canvas.clear();
            self.canvas.copy(&texture, None, None)?;
            self.canvas.present();

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }

        Ok(())
    }
}

/// Convert SDL2 keycode to a game button
fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Up => Some(Button::Up),
        Keycode::Down => Some(Button::Down),
        Keycode::Left => Some(Button::Left),
        Keycode::Right => Some(Button::Right),
        _ => None,
    }
}
